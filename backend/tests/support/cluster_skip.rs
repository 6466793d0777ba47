//! `SKIP_TEST_CLUSTER` policy for suites that need embedded PostgreSQL.
//!
//! The embedded cluster is started by default. Environments that cannot run
//! it opt out explicitly; otherwise a setup failure fails the test.

/// Whether `SKIP_TEST_CLUSTER` holds "1", "true" or "yes" (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Returns `None` with a skip marker when skipping is allowed, and panics
/// otherwise so a broken cluster is never reported as a pass.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
