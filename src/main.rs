//! daqloop host entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  StdinBytes     StdoutConsole    ThreadTicker    SimLed ×2   │
//! │  (ByteSource)   (fmt::Write)     (TickSource)    (OutputPin) │
//! │  SweptPotentiometer (SensorPort)                             │
//! │                                                              │
//! │  ─────────────────── Port Trait Boundary ─────────────────   │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  Session: acquisition task · input task · command loop │  │
//! │  │  CommandDispatcher · AcquisitionController · Store     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `info`) so the operator console
//! on stdout stays clean.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use daqloop::acquisition::AcquisitionController;
use daqloop::adapters::console::{StdinBytes, StdoutConsole};
use daqloop::app::ports::ConfigError;
use daqloop::config::{BUFFER_CAPACITY, SystemConfig};
use daqloop::drivers::hw_timer::ThreadTicker;
use daqloop::drivers::indicator::SimLed;
use daqloop::events::Signals;
use daqloop::sensors::SweptPotentiometer;
use daqloop::session::Session;
use daqloop::store::SharedStore;

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "DAQLOOP_CONFIG";

/// Reads for the simulated knob to sweep from 0.0 to 1.0.
const SWEEP_STEPS: u16 = 50;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("daqloop v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file or defaults) ──────────────────────────
    let config = load_config()?;
    info!(
        "Config: period={}ms, sampling_on_boot={}, capacity={}",
        config.sample_period_ms, config.sampling_on_boot, BUFFER_CAPACITY
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let signals = Arc::new(Signals::new());
    let ticker = ThreadTicker::start(Arc::clone(&signals)).context("starting sample timer")?;
    let acquisition = Arc::new(AcquisitionController::new(
        config.sample_period(),
        ticker,
        SimLed::new("idle"),
        SimLed::new("activity"),
    ));
    let store = Arc::new(SharedStore::<BUFFER_CAPACITY>::new());

    // ── 4. Session ────────────────────────────────────────────
    info!("System ready. Entering console loop.");
    Session::new(config, signals, store, acquisition)
        .run(
            SweptPotentiometer::new(SWEEP_STEPS),
            StdinBytes::new(),
            StdoutConsole::new(),
        )
        .context("console session")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load the config named by `DAQLOOP_CONFIG`, or fall back to defaults
/// when the variable is unset or the file is missing.
fn load_config() -> Result<SystemConfig> {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        info!("Config: {} not set, using defaults", CONFIG_ENV);
        return Ok(SystemConfig::default());
    };
    match SystemConfig::load(&path) {
        Ok(config) => {
            info!("Config loaded from {}", path.to_string_lossy());
            Ok(config)
        }
        Err(ConfigError::NotFound) => {
            warn!(
                "Config: {} not found, using defaults",
                path.to_string_lossy()
            );
            Ok(SystemConfig::default())
        }
        Err(e) => Err(daqloop::error::Error::from(e))
            .with_context(|| format!("loading {}", path.to_string_lossy())),
    }
}
