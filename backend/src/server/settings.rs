//! Service settings loaded via OrthoConfig.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 80;
const DEFAULT_IMAGES: &str = "./images/";
const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 2000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Start-up configuration for the catalogue server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct CatalogueSettings {
    /// Port to listen on.
    pub port: Option<u16>,
    /// Directory holding catalogue images.
    pub images: Option<PathBuf>,
    /// PostgreSQL connection string; the seeded in-memory store is used
    /// when absent.
    pub dsn: Option<String>,
    /// Upper bound on the store ping made by health checks.
    pub health_timeout_ms: Option<u64>,
    /// Expose Prometheus metrics on `/metrics`; on unless disabled.
    ///
    /// Boolean switches stay off the command line: a clap `SetTrue` flag
    /// always reports `false` when absent and would mask the environment.
    #[ortho_config(skip_cli)]
    pub metrics: Option<bool>,
    /// Apply embedded migrations before serving.
    #[ortho_config(skip_cli)]
    pub migrate: Option<bool>,
    /// Pool size for database connections.
    pub db_max_connections: Option<u32>,
}

impl CatalogueSettings {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Listen on every interface.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port()))
    }

    pub fn images(&self) -> PathBuf {
        self.images
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGES))
    }

    /// Connection string with surrounding whitespace removed; blank values
    /// count as unset.
    pub fn dsn(&self) -> Option<&str> {
        self.dsn
            .as_deref()
            .map(str::trim)
            .filter(|dsn| !dsn.is_empty())
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_millis(self.health_timeout_ms.unwrap_or(DEFAULT_HEALTH_TIMEOUT_MS))
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics.unwrap_or(true)
    }

    pub fn migrate(&self) -> bool {
        self.migrate.unwrap_or(false)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "CATALOGUE_PORT",
        "CATALOGUE_IMAGES",
        "CATALOGUE_DSN",
        "CATALOGUE_HEALTH_TIMEOUT_MS",
        "CATALOGUE_METRICS",
        "CATALOGUE_MIGRATE",
        "CATALOGUE_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> CatalogueSettings {
        CatalogueSettings::load_from_iter([OsString::from("catalogue")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 80)));
        assert_eq!(settings.images(), PathBuf::from("./images/"));
        assert_eq!(settings.dsn(), None);
        assert_eq!(settings.health_timeout(), Duration::from_secs(2));
        assert!(settings.metrics_enabled());
        assert!(!settings.migrate());
        assert_eq!(settings.db_max_connections(), 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CATALOGUE_PORT", Some("8080".to_owned())),
            ("CATALOGUE_IMAGES", Some("/srv/images".to_owned())),
            (
                "CATALOGUE_DSN",
                Some("postgres://catalogue_user@db/socksdb".to_owned()),
            ),
            ("CATALOGUE_HEALTH_TIMEOUT_MS", Some("250".to_owned())),
            ("CATALOGUE_METRICS", Some("false".to_owned())),
            ("CATALOGUE_MIGRATE", Some("true".to_owned())),
            ("CATALOGUE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.port(), 8080);
        assert_eq!(settings.images(), PathBuf::from("/srv/images"));
        assert_eq!(settings.dsn(), Some("postgres://catalogue_user@db/socksdb"));
        assert_eq!(settings.health_timeout(), Duration::from_millis(250));
        assert!(!settings.metrics_enabled());
        assert!(settings.migrate());
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    fn unset_switches_stay_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.metrics, None);
        assert_eq!(settings.migrate, None);
    }

    #[rstest]
    #[case("true", "false", true, false)]
    #[case("false", "true", false, true)]
    fn switches_follow_the_environment(
        #[case] metrics: &str,
        #[case] migrate: &str,
        #[case] metrics_enabled: bool,
        #[case] migrate_enabled: bool,
    ) {
        let _guard = lock_env(VARS.map(|name| {
            let value = match name {
                "CATALOGUE_METRICS" => Some(metrics.to_owned()),
                "CATALOGUE_MIGRATE" => Some(migrate.to_owned()),
                _ => None,
            };
            (name, value)
        }));

        let settings = load_from_empty_args();
        assert_eq!(settings.metrics_enabled(), metrics_enabled);
        assert_eq!(settings.migrate(), migrate_enabled);
    }

    #[rstest]
    fn blank_dsn_counts_as_unset() {
        let _guard = lock_env(
            VARS.map(|name| (name, (name == "CATALOGUE_DSN").then(|| "  ".to_owned()))),
        );

        assert_eq!(load_from_empty_args().dsn(), None);
    }
}
