//! Port traits: the hexagonal boundary between the acquisition core and
//! the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Store · Controller · Dispatcher
//! ```
//!
//! Driven adapters (sensor, tick source, console) implement these traits.
//! Indicator pins use `embedded_hal::digital::StatefulOutputPin` directly
//! rather than a bespoke port.

use core::time::Duration;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// The acquisition controller calls this once per accepted tick.
pub trait SensorPort {
    /// One normalised reading (0.0 = bottom of range, 1.0 = full scale).
    fn read(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Tick source (driven adapter: periodic timer)
// ───────────────────────────────────────────────────────────────

/// Periodic tick delivery.
///
/// While armed, the implementation raises
/// [`Signals::sample_tick`](crate::events::Signals::sample_tick) once per
/// `period`.  The core never measures time itself.
pub trait TickSource {
    fn arm(&mut self, period: Duration);
    fn disarm(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Console ports (driven adapters: serial line)
// ───────────────────────────────────────────────────────────────

/// Raw operator keystrokes.
pub trait ByteSource {
    /// Block for the next byte.  `None` means the input is closed.
    fn read_byte(&mut self) -> Option<u8>;
}

/// What the dispatcher needs from the operator console: formatted output
/// plus a single keypress for yes/no confirmations.
pub trait ConsolePort: core::fmt::Write {
    /// Block for one key.  `None` means the console is gone.
    fn read_key(&mut self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from loading configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config file at the given path.
    NotFound,
    /// The file is not a valid config document.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the file.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
