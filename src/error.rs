//! Unified error types for the acquisition loop.
//!
//! Operator mistakes (bad operands, unknown verbs, declined deletes) are
//! not errors. They are [`Outcome`](crate::app::outcome::Outcome)s and
//! the console keeps running.  This type covers the few things that can
//! actually stop the process: bad configuration and failing to start a
//! worker.

use core::fmt;

use crate::app::ports::ConfigError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A worker thread could not be started.
    Spawn(&'static str),
    /// A worker thread panicked and could not be joined cleanly.
    WorkerPanicked(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Spawn(name) => write!(f, "failed to spawn worker '{name}'"),
            Self::WorkerPanicked(name) => write!(f, "worker '{name}' panicked"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
