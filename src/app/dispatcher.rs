//! Command dispatcher. Executes operator commands against the sample
//! store and the acquisition controller.
//!
//! ```text
//!  Command ──▶ ┌──────────────────────┐ ──▶ Outcome (one per command)
//!              │  CommandDispatcher   │
//!  ConsolePort ◀│ validate · confirm   │──▶ SharedStore / Controller
//!              └──────────────────────┘
//! ```
//!
//! Validation failures, declined deletes and redundant sampling toggles
//! are ordinary outcomes: nothing is mutated and the console carries on.

use std::sync::Arc;

use embedded_hal::digital::StatefulOutputPin;
use log::{debug, info};

use crate::acquisition::{AcquisitionController, Transition};
use crate::store::SharedStore;

use super::commands::Command;
use super::outcome::{Notice, Outcome, UsageVerb};
use super::ports::{ConsolePort, TickSource};

/// Line ending used on the serial console.
pub const EOL: &str = "\r\n";

/// Executes [`Command`]s for a store of capacity `N`.
pub struct CommandDispatcher<const N: usize, T, P> {
    store: Arc<SharedStore<N>>,
    acquisition: Arc<AcquisitionController<T, P>>,
}

impl<const N: usize, T: TickSource, P: StatefulOutputPin> CommandDispatcher<N, T, P> {
    pub fn new(store: Arc<SharedStore<N>>, acquisition: Arc<AcquisitionController<T, P>>) -> Self {
        Self { store, acquisition }
    }

    /// Execute one command.
    ///
    /// Listings, clamp notices and the delete prompt are written to
    /// `console` as they happen; the returned [`Outcome`] is the closing
    /// message, left for the caller to print.  An `Err` only means the
    /// console could not be written.
    pub fn dispatch(
        &mut self,
        command: Command,
        console: &mut impl ConsolePort,
    ) -> Result<Outcome, core::fmt::Error> {
        debug!("Dispatch: {:?}", command);
        let outcome = match command {
            Command::Print(n) => match self.checked(n, UsageVerb::Print) {
                Ok(n) => self.print(n, console)?,
                Err(invalid) => invalid,
            },
            Command::Delete(n) => match self.checked(n, UsageVerb::Delete) {
                Ok(n) => self.delete(n, console)?,
                Err(invalid) => invalid,
            },
            Command::SamplingOn => match self.acquisition.enable() {
                Transition::Changed => Outcome::SamplingChanged { on: true },
                Transition::Unchanged => Outcome::SamplingUnchanged { on: true },
            },
            Command::SamplingOff => match self.acquisition.disable() {
                Transition::Changed => Outcome::SamplingChanged { on: false },
                Transition::Unchanged => Outcome::SamplingUnchanged { on: false },
            },
            Command::SamplingInvalid => Outcome::InvalidSamplingOperand,
            Command::Unknown => Outcome::UnknownCommand,
        };
        Ok(outcome)
    }

    // ── Commands ──────────────────────────────────────────────

    fn print(&self, n: i64, console: &mut impl ConsolePort) -> Result<Outcome, core::fmt::Error> {
        // Copy out under the lock, format after releasing it.
        let (samples, clamped, average) = self.store.read(n, |readout| {
            let samples: heapless::Vec<f32, N> = readout.samples.collect();
            (samples, readout.clamped, readout.average)
        });

        if let Some(clamped) = clamped {
            write!(console, "{}{EOL}", Notice { verb: UsageVerb::Print, clamped })?;
        }
        for (i, value) in samples.iter().enumerate() {
            write!(console, "Sample {} from oldest: {:.6}{EOL}", i + 1, value)?;
        }

        Ok(Outcome::Printed {
            shown: samples.len(),
            average,
        })
    }

    fn delete(&self, n: i64, console: &mut impl ConsolePort) -> Result<Outcome, core::fmt::Error> {
        write!(
            console,
            "Are you sure you want to delete {} records? (y/n){EOL}-> ",
            n
        )?;
        let answer = console.read_key();
        console.write_str(EOL)?;

        if answer != Some(b'y') {
            info!("Dispatch: delete {} cancelled", n);
            return Ok(Outcome::Cancelled);
        }

        let eviction = self.store.evict_oldest(n);
        if let Some(clamped) = eviction.clamped {
            write!(console, "{}{EOL}", Notice { verb: UsageVerb::Delete, clamped })?;
        }
        let stats = self.store.stats();
        info!(
            "Dispatch: evicted {} samples (count={}, avg={:.4})",
            eviction.removed, stats.count, stats.average
        );
        Ok(Outcome::Deleted {
            removed: eviction.removed,
        })
    }

    // ── Internal ──────────────────────────────────────────────

    /// Accept `n` only within `1..=N`.
    fn checked(&self, n: i64, verb: UsageVerb) -> Result<i64, Outcome> {
        match usize::try_from(n) {
            Ok(count) if (1..=N).contains(&count) => Ok(n),
            _ => Err(Outcome::InvalidUsage { verb, capacity: N }),
        }
    }
}
