use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber.
///
/// Defaults to `warn` so nothing is written over the alternate screen while
/// the cube spins; `RUST_LOG=wirecube_core=debug` shows the frame rate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}
