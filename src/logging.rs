use tracing_subscriber::filter::EnvFilter;

/// Initialize logging to stderr, `info` unless `RUST_LOG` says otherwise.
///
/// Stdout is left alone: the CLI prints its views there and the MCP server
/// uses it as its transport.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
