use tracing_subscriber::EnvFilter;

/// Uses `RUST_LOG` when set, otherwise the configured level. Logs go to stderr
/// so command output stays pipeable.
pub fn init(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
