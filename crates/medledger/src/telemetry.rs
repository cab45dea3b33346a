use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` is honoured; INFO is always on.
/// Safe to call more than once: later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
    {
        tracing::info!("Starting MedLedger");
    }
}
