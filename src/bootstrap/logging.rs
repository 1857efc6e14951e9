use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber
/// Filter with RUST_LOG, defaults to info
pub fn initialize() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
