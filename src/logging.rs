use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: Level = Level::INFO;

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(DEFAULT_FILTER.into()))
}

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    FmtSubscriber::builder()
        .with_env_filter(env_filter())
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .compact()
        .try_init()
}
