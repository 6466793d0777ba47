//! Catalogue entry-point: loads settings, prepares the store and serves HTTP.

mod server;

use std::io;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalogue::inbound::http::images::ImageDir;
use catalogue::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{CatalogueSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = CatalogueSettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;

    let mut config = ServerConfig::new(settings.bind_addr())
        .with_health_timeout(settings.health_timeout());

    if let Some(dsn) = settings.dsn() {
        if settings.migrate() {
            apply_migrations(dsn.to_owned()).await?;
        }
        let pool_config = PoolConfig::new(dsn).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(&pool_config).map_err(io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let images = settings.images();
    match ImageDir::open(&images) {
        Ok(dir) => config = config.with_images(dir),
        Err(e) => warn!(path = %images.display(), error = %e, "image directory unavailable"),
    }

    #[cfg(feature = "metrics")]
    {
        let registry = settings.metrics_enabled().then(prometheus::Registry::new);
        config = config.with_metrics(registry);
    }

    info!(addr = %config.bind_addr(), "catalogue listening");
    create_server(config)?.await
}

async fn apply_migrations(dsn: String) -> io::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_migrations(&dsn))
        .await
        .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
        .map_err(io::Error::other)?;
    info!(applied, "database migrations applied");
    Ok(())
}
