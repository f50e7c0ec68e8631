//! Logging setup.
//!
//! Library code only emits events from configuration handling and store
//! maintenance. The suppression path never logs.

/// Install an env-filtered (`RUST_LOG`) fmt subscriber writing to stderr,
/// unless the host application already installed one.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
