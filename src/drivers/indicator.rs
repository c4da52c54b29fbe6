//! Indicator LED driver.
//!
//! Two discrete LEDs report acquisition state: the idle LED is lit while
//! sampling is off, the activity LED toggles on every sample.
//!
//! ## Dual-target design
//!
//! On hardware: any `embedded_hal` `StatefulOutputPin` can be handed to
//! the controller directly.
//! On host/test: [`SimLed`] tracks the level in memory and exposes it
//! through a [`LedProbe`].

use core::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

/// In-memory LED implementing the `embedded_hal` pin traits.
#[derive(Debug)]
pub struct SimLed {
    name: &'static str,
    level: Arc<AtomicBool>,
}

impl SimLed {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            level: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Read-only handle for observing the LED after it has been moved
    /// into the controller.
    pub fn probe(&self) -> LedProbe {
        LedProbe {
            level: Arc::clone(&self.level),
        }
    }

    fn set(&mut self, lit: bool) {
        let was = self.level.swap(lit, Ordering::Relaxed);
        if was != lit {
            log::debug!("LED({}): {}", self.name, if lit { "on" } else { "off" });
        }
    }
}

impl ErrorType for SimLed {
    type Error = Infallible;
}

impl OutputPin for SimLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for SimLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.load(Ordering::Relaxed))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.load(Ordering::Relaxed))
    }
}

/// Shared view of a [`SimLed`] level.
#[derive(Debug, Clone)]
pub struct LedProbe {
    level: Arc<AtomicBool>,
}

impl LedProbe {
    pub fn is_lit(&self) -> bool {
        self.level.load(Ordering::Relaxed)
    }
}
