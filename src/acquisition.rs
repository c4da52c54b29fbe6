//! Acquisition controller. Owns whether and how often the sensor is
//! sampled.
//!
//! ```text
//!            enable()                     tick (Enabled only)
//!  Disabled ─────────▶ Enabled ──────────▶ read sensor → store.insert
//!     ▲                   │
//!     └───── disable() ───┘
//! ```
//!
//! The controller is shared between the command worker (`enable` /
//! `disable`) and the acquisition worker (`on_tick`).  Its state lives
//! behind its own lock, which is always released before the store lock
//! is taken, so the two locks are never nested.

use core::time::Duration;
use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::digital::{Error as _, StatefulOutputPin};
use log::{info, trace, warn};

use crate::app::ports::{SensorPort, TickSource};
use crate::store::SharedStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    Disabled,
    Enabled,
}

/// Result of an `enable`/`disable` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The state changed.
    Changed,
    /// Already in the requested state; nothing was re-applied.
    Unchanged,
}

struct Inner<T, P> {
    state: AcquisitionState,
    ticks: T,
    /// Lit while sampling is off.
    idle_led: P,
    /// Toggled on every sample.
    activity_led: P,
}

pub struct AcquisitionController<T, P> {
    period: Duration,
    inner: Mutex<Inner<T, P>>,
}

impl<T: TickSource, P: StatefulOutputPin> AcquisitionController<T, P> {
    /// Build a controller in the `Disabled` state (idle indicator lit).
    pub fn new(period: Duration, ticks: T, mut idle_led: P, mut activity_led: P) -> Self {
        drive(&mut idle_led, true, "idle");
        drive(&mut activity_led, false, "activity");
        Self {
            period,
            inner: Mutex::new(Inner {
                state: AcquisitionState::Disabled,
                ticks,
                idle_led,
                activity_led,
            }),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn state(&self) -> AcquisitionState {
        self.lock().state
    }

    pub fn is_enabled(&self) -> bool {
        self.state() == AcquisitionState::Enabled
    }

    /// Arm periodic sampling.
    pub fn enable(&self) -> Transition {
        let mut inner = self.lock();
        if inner.state == AcquisitionState::Enabled {
            return Transition::Unchanged;
        }
        inner.state = AcquisitionState::Enabled;
        drive(&mut inner.idle_led, false, "idle");
        inner.ticks.arm(self.period);
        info!("Acquisition: enabled (period={}ms)", self.period.as_millis());
        Transition::Changed
    }

    /// Disarm periodic sampling and reset the indicators.
    pub fn disable(&self) -> Transition {
        let mut inner = self.lock();
        if inner.state == AcquisitionState::Disabled {
            return Transition::Unchanged;
        }
        inner.ticks.disarm();
        inner.state = AcquisitionState::Disabled;
        drive(&mut inner.idle_led, true, "idle");
        drive(&mut inner.activity_led, false, "activity");
        info!("Acquisition: disabled");
        Transition::Changed
    }

    /// Handle one delivered tick: sample the sensor into `store`.
    ///
    /// Returns the inserted value, or `None` for a tick that was already
    /// in flight when sampling was switched off.
    pub fn on_tick<S: SensorPort, const N: usize>(
        &self,
        sensor: &mut S,
        store: &SharedStore<N>,
    ) -> Option<f32> {
        {
            let mut inner = self.lock();
            if inner.state == AcquisitionState::Disabled {
                trace!("Acquisition: stale tick ignored");
                return None;
            }
            if let Err(e) = inner.activity_led.toggle() {
                warn!("Acquisition: activity indicator toggle failed: {:?}", e.kind());
            }
        }

        let value = sensor.read();
        store.insert(value);
        Some(value)
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Set an indicator; pin failures are decorative and only logged.
fn drive<P: StatefulOutputPin>(pin: &mut P, high: bool, name: &str) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        warn!("Acquisition: {} indicator write failed: {:?}", name, e.kind());
    }
}
