//! Timer, indicator and task helpers standing in for controller peripherals.

pub mod hw_timer;
pub mod indicator;
pub mod task;
