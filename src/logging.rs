use color_eyre::eyre::{Result, eyre};
use tracing::Level;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Logging setup, built once from the command line and handed to [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
}

impl LogConfig {
    pub fn from_verbosity(verbose: bool) -> Self {
        let level = if verbose { Level::INFO } else { Level::WARN };
        Self { level }
    }

    /// `RUST_LOG` wins over the configured level when it is set.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy()
    }
}

/// Installs the process-wide subscriber. Call once, from `main`.
pub fn init(config: &LogConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("Failed to install log subscriber: {e}"))
}
