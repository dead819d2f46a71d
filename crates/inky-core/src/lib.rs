pub mod config;
pub mod error;
pub mod mode;

pub use config::{
    Config, DisplayConfig, EndpointConfig, MapMode, NetworkConfig, PresetCity, StationsConfig,
    TimingConfig, ValidationResult,
};
pub use error::{AppError, ConfigError, NetworkError};
pub use mode::{ButtonEvent, ModeConfig, ModeState, MANUAL_TIMEOUT};

use anyhow::Result;

/// Initialize logging. `RUST_LOG` overrides the default `info` filter.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("inky-station core initialized");
    Ok(())
}
