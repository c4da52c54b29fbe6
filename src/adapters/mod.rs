//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter                    | Implements     | Connects to          |
//! |----------------------------|----------------|----------------------|
//! | `console::StdinBytes`      | ByteSource     | process stdin        |
//! | `console::ScriptedBytes`   | ByteSource     | in-memory script     |
//! | `console::StdoutConsole`   | fmt::Write     | process stdout       |
//! | `drivers::hw_timer`        | TickSource     | timer thread         |
//! | `drivers::indicator`       | OutputPin      | in-memory LED        |
//! | `sensors::*`               | SensorPort     | simulated ADC        |

pub mod console;
