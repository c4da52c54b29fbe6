//! Bounded line editor for the operator console.
//!
//! Bytes arrive one at a time from the serial line.  The editor applies
//! backspace/delete, ends the line on CR or LF, and force-completes it
//! once `L` bytes have been typed.  A CR LF pair ends one line, not two.

use heapless::Vec;

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;
const CARRIAGE_RETURN: u8 = b'\r';
const LINE_FEED: u8 = b'\n';

/// Whether `byte` ends a line (CR or LF).
pub fn is_terminator(byte: u8) -> bool {
    matches!(byte, CARRIAGE_RETURN | LINE_FEED)
}

/// State after feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// Keep feeding.
    Pending,
    /// The line is complete; take it with [`LineEditor::take`].
    Complete,
}

/// Composes one command line of at most `L` bytes.
#[derive(Debug, Default)]
pub struct LineEditor<const L: usize> {
    buf: Vec<u8, L>,
    /// The previous byte was a CR.
    after_cr: bool,
    /// Drop a terminator if it is the next byte.
    skip_terminator: bool,
}

impl<const L: usize> LineEditor<L> {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            after_cr: false,
            skip_terminator: false,
        }
    }

    /// Feed one keystroke.
    ///
    /// An Enter on an empty line completes an empty line.  The LF of a
    /// CR LF pair is dropped.
    pub fn feed(&mut self, byte: u8) -> LineStatus {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == CARRIAGE_RETURN);
        let skip_terminator = core::mem::take(&mut self.skip_terminator);
        match byte {
            BACKSPACE | DELETE => {
                self.buf.pop();
                LineStatus::Pending
            }
            LINE_FEED if after_cr => LineStatus::Pending,
            CARRIAGE_RETURN | LINE_FEED if skip_terminator => LineStatus::Pending,
            CARRIAGE_RETURN | LINE_FEED => LineStatus::Complete,
            _ => {
                // Cannot fail: the line completes as soon as it is full.
                let _ = self.buf.push(byte);
                if self.buf.is_full() {
                    LineStatus::Complete
                } else {
                    LineStatus::Pending
                }
            }
        }
    }

    /// Drop the Enter that follows a single-key answer.
    ///
    /// Only applies if the next byte fed is a terminator; any other byte
    /// cancels it.
    pub fn skip_next_terminator(&mut self) {
        self.after_cr = false;
        self.skip_terminator = true;
    }

    /// Bytes typed so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Hand over the composed line and start a new one.
    pub fn take(&mut self) -> Vec<u8, L> {
        core::mem::take(&mut self.buf)
    }
}
