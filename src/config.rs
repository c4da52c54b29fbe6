//! System configuration parameters
//!
//! Buffer geometry is fixed at compile time; the timing and start-up
//! behaviour can be overridden from a JSON file (see [`SystemConfig::load`]).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Number of samples retained in the history ring.
pub const BUFFER_CAPACITY: usize = 120;

/// Longest command line the console accepts, in bytes.
pub const LINE_MAX_LEN: usize = 15;

/// Longest sampling period accepted from configuration.
const MAX_SAMPLE_PERIOD_MS: u32 = 60_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Timing ---
    /// Sensor sampling period (milliseconds)
    pub sample_period_ms: u32,

    // --- Start-up ---
    /// Arm periodic sampling before the first prompt
    pub sampling_on_boot: bool,
    /// Print the command summary before the first prompt
    pub show_banner: bool,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 100, // 10 Hz
            sampling_on_boot: true,
            show_banner: true,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("sample_period_ms must be > 0"));
        }
        if self.sample_period_ms > MAX_SAMPLE_PERIOD_MS {
            return Err(ConfigError::ValidationFailed(
                "sample_period_ms must be <= 60000",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("Config: parse error: {}", e);
            ConfigError::Corrupted
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            log::warn!("Config: cannot read {}: {}", path.display(), e);
            match e.kind() {
                std::io::ErrorKind::NotFound => ConfigError::NotFound,
                _ => ConfigError::IoError,
            }
        })?;
        Self::from_json(&json)
    }

    /// Sampling period as a [`Duration`](core::time::Duration).
    pub fn sample_period(&self) -> core::time::Duration {
        core::time::Duration::from_millis(u64::from(self.sample_period_ms))
    }
}
