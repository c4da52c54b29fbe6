//! Inbound operator commands.
//!
//! A composed console line becomes a [`Command`] that the
//! [`CommandDispatcher`](super::dispatcher::CommandDispatcher) executes.
//! Parsing never fails: anything unrecognised maps to a variant the
//! dispatcher answers with a usage message.

/// Commands the operator console can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `print <n>`: list the `n` oldest samples.
    Print(i64),
    /// `delete <n>`: evict the `n` oldest samples (after confirmation).
    Delete(i64),
    /// `sampling on`
    SamplingOn,
    /// `sampling off`
    SamplingOff,
    /// `sampling` followed by anything other than `on`/`off`.
    SamplingInvalid,
    /// Unrecognised verb.
    Unknown,
}

impl Command {
    /// Parse one console line.
    ///
    /// The line splits at its first space into verb and operand.  Spaces
    /// after that point are dropped, so `print 1 2` carries operand `12`.
    /// Numeric operands follow `strtol`: a leading integer prefix is
    /// accepted and no digits at all reads as `0`.
    pub fn parse(line: &[u8]) -> Self {
        let (verb, rest) = match line.iter().position(|&b| b == b' ') {
            Some(split) => (&line[..split], &line[split + 1..]),
            None => (line, &[][..]),
        };

        let mut operand: heapless::Vec<u8, 64> = heapless::Vec::new();
        for &b in rest.iter().filter(|&&b| b != b' ') {
            if operand.push(b).is_err() {
                break;
            }
        }

        match verb {
            b"print" => Self::Print(parse_integer(&operand)),
            b"delete" => Self::Delete(parse_integer(&operand)),
            b"sampling" => match operand.as_slice() {
                b"on" => Self::SamplingOn,
                b"off" => Self::SamplingOff,
                _ => Self::SamplingInvalid,
            },
            _ => Self::Unknown,
        }
    }
}

/// Base-10 integer prefix with `strtol` rules: optional leading
/// whitespace and sign, then as many digits as present.  Saturates on
/// overflow; `0` when there are no digits.
pub fn parse_integer(text: &[u8]) -> i64 {
    let mut bytes = text
        .iter()
        .copied()
        .skip_while(u8::is_ascii_whitespace)
        .peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for digit in bytes.map_while(|b| b.is_ascii_digit().then(|| i64::from(b - b'0'))) {
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}
