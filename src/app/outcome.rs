//! Outbound command results.
//!
//! Every dispatch yields exactly one [`Outcome`]; its `Display` is the
//! message the operator sees.  [`Notice`] carries the advisory clamp text
//! that may precede a print listing or a delete result.

use core::fmt;

use crate::store::Clamped;

/// Verb named in an invalid-usage message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageVerb {
    Print,
    Delete,
}

impl UsageVerb {
    fn as_str(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Delete => "delete",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Print => "printed",
            Self::Delete => "deleted",
        }
    }
}

/// Result of one dispatched command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// `print` listed `shown` samples.
    Printed { shown: usize, average: f64 },
    /// `delete` was confirmed and evicted `removed` samples.
    Deleted { removed: usize },
    /// `delete` was declined at the prompt.
    Cancelled,
    /// Operand outside `1..=capacity` (or not a number).
    InvalidUsage { verb: UsageVerb, capacity: usize },
    /// Sampling switched to the given state.
    SamplingChanged { on: bool },
    /// Sampling was already in the requested state.
    SamplingUnchanged { on: bool },
    /// `sampling` with an operand other than `on`/`off`.
    InvalidSamplingOperand,
    /// Unrecognised verb.
    UnknownCommand,
}

impl Outcome {
    /// Whether the command changed the store or the sampling state.
    pub fn mutated(&self) -> bool {
        matches!(
            self,
            Self::Deleted { .. } | Self::SamplingChanged { .. }
        )
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Printed { shown, average } => write!(
                f,
                "{} samples printed; running average of the buffer is {:.6}",
                shown, average
            ),
            Self::Deleted { removed } => {
                write!(f, "{} samples from oldest were deleted", removed)
            }
            Self::Cancelled => write!(f, "Operation cancelled"),
            Self::InvalidUsage { verb, capacity } => write!(
                f,
                "Invalid input - usage: {}(n) where {} >= n > 0",
                verb.as_str(),
                capacity
            ),
            Self::SamplingChanged { on } => write!(f, "Sampling was turned {}", on_off(*on)),
            Self::SamplingUnchanged { on } => write!(
                f,
                "Sampling was already {} - no change has been made",
                on_off(*on)
            ),
            Self::InvalidSamplingOperand => write!(
                f,
                "A valid operand was not entered. Valid operands are: on, off"
            ),
            Self::UnknownCommand => write!(
                f,
                "A valid command was not entered. Valid commands are: {}",
                USAGE
            ),
        }
    }
}

/// Command summary shown at start-up and for unrecognised verbs.
pub const USAGE: &str = "print (n), delete(n), sampling(on/off)";

/// Advisory notice: the requested count was reduced to what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub verb: UsageVerb,
    pub clamped: Clamped,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.clamped.effective;
        write!(
            f,
            "You specified a number higher than the current length of the buffer. \
             There are currently only {n} samples in the buffer; {n} samples will be {}",
            self.verb.past_tense()
        )
    }
}
