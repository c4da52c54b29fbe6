//! Analog potentiometer input.
//!
//! Reads a 12-bit ADC channel and normalises it to 0.0–1.0, the same
//! scale an `AnalogIn` read returns on the controller.
//!
//! ## Dual-target design
//!
//! On hardware: the raw count comes from the ADC driver.
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::SensorPort;

static SIM_POT_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject the raw ADC count the next reads will return.
pub fn sim_set_pot_adc(raw: u16) {
    SIM_POT_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale count of the 12-bit converter.
pub const ADC_FULL_SCALE: u16 = 4095;

#[derive(Debug, Default)]
pub struct Potentiometer;

impl Potentiometer {
    pub fn new() -> Self {
        Self
    }

    fn read_adc(&self) -> u16 {
        SIM_POT_ADC.load(Ordering::Relaxed)
    }
}

/// Map a raw count onto 0.0–1.0, saturating above full scale.
pub fn normalise(raw: u16) -> f32 {
    f32::from(raw.min(ADC_FULL_SCALE)) / f32::from(ADC_FULL_SCALE)
}

/// Nearest raw count for a knob position in 0.0–1.0. Out-of-range
/// positions saturate at the rails.
pub fn to_counts(position: f32) -> u16 {
    (position.clamp(0.0, 1.0) * f32::from(ADC_FULL_SCALE)).round() as u16
}

impl SensorPort for Potentiometer {
    fn read(&mut self) -> f32 {
        normalise(self.read_adc())
    }
}
