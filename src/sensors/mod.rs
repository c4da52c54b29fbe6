//! Sensor sources implementing [`SensorPort`].
//!
//! [`potentiometer::Potentiometer`] models the real analog input.
//! [`SweptPotentiometer`] is what the host binary samples: a
//! [`TriangleSweep`] turns the simulated knob by injecting ADC counts, so
//! the history fills with visibly changing values without a knob to turn.

pub mod potentiometer;

use crate::app::ports::SensorPort;
use potentiometer::{Potentiometer, sim_set_pot_adc, to_counts};

/// Deterministic 0.0 → 1.0 → 0.0 ramp, advancing one step per read.
#[derive(Debug, Clone)]
pub struct TriangleSweep {
    step: f32,
    value: f32,
    rising: bool,
}

impl TriangleSweep {
    /// `steps` reads take the output from one end of the range to the other.
    pub fn new(steps: u16) -> Self {
        Self {
            step: 1.0 / f32::from(steps.max(1)),
            value: 0.0,
            rising: true,
        }
    }
}

impl SensorPort for TriangleSweep {
    fn read(&mut self) -> f32 {
        let current = self.value;
        if self.rising {
            self.value += self.step;
            if self.value >= 1.0 {
                self.value = 1.0;
                self.rising = false;
            }
        } else {
            self.value -= self.step;
            if self.value <= 0.0 {
                self.value = 0.0;
                self.rising = true;
            }
        }
        current
    }
}

/// Potentiometer whose knob is turned by a [`TriangleSweep`] between reads.
///
/// Each read injects the next sweep position as a raw count, then samples
/// it back through the ADC path.
#[derive(Debug)]
pub struct SweptPotentiometer {
    knob: TriangleSweep,
    pot: Potentiometer,
}

impl SweptPotentiometer {
    pub fn new(steps: u16) -> Self {
        Self {
            knob: TriangleSweep::new(steps),
            pot: Potentiometer::new(),
        }
    }
}

impl SensorPort for SweptPotentiometer {
    fn read(&mut self) -> f32 {
        sim_set_pot_adc(to_counts(self.knob.read()));
        self.pot.read()
    }
}
