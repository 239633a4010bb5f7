use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "kinemix=info,kinemix_persistence=info,kinemix_cli=info,kmix=info";

/// Initialize logging. Logs go to stderr so stdout only carries command output.
pub fn init_telemetry() {
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::warn!("Global subscriber already set. Telemetry re-initialized?");
    }
}
