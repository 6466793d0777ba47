//! Shared embedded PostgreSQL cluster for integration tests.
//!
//! The cluster is started once per test binary by `pg-embed-setup-unpriv`.
//! Start-up is retried because the first run downloads PostgreSQL binaries
//! and parallel binaries can race for them.

use std::time::Duration;

use pg_embedded_setup_unpriv::ClusterHandle;

const SHARED_CLUSTER_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// The process-wide cluster handle, or the last bootstrap error.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 0;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < SHARED_CLUSTER_RETRIES => {
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                eprintln!(
                    "pg-embed: attempt {}/{} failed, retrying in {delay:?}: {err:?}",
                    attempt + 1,
                    SHARED_CLUSTER_RETRIES + 1,
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(err) => return Err(format!("{err:?}")),
        }
    }
}
