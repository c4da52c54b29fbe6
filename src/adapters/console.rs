//! Host console adapters.
//!
//! [`StdinBytes`] feeds raw operator bytes to the input task;
//! [`StdoutConsole`] receives everything the command task prints.  On the
//! controller both sides sit on the same UART.

use std::io::{Read, Write};

use crate::app::ports::ByteSource;

/// Byte-at-a-time reader over the process's standard input.
pub struct StdinBytes {
    stdin: std::io::Stdin,
}

impl Default for StdinBytes {
    fn default() -> Self {
        Self::new()
    }
}

impl StdinBytes {
    pub fn new() -> Self {
        Self {
            stdin: std::io::stdin(),
        }
    }
}

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        loop {
            match self.stdin.lock().read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    log::warn!("Console: stdin read failed: {}", e);
                    return None;
                }
            }
        }
    }
}

/// Formatted console output on standard output, flushed per write so
/// prompts appear before the operator types.
pub struct StdoutConsole {
    stdout: std::io::Stdout,
}

impl Default for StdoutConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl StdoutConsole {
    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
        }
    }
}

impl core::fmt::Write for StdoutConsole {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let mut out = self.stdout.lock();
        out.write_all(s.as_bytes())
            .and_then(|()| out.flush())
            .map_err(|_| core::fmt::Error)
    }
}

/// Scripted byte source over an in-memory buffer.
///
/// Used for replaying a fixed command sequence (tests, piped demos).
#[derive(Debug, Clone)]
pub struct ScriptedBytes {
    bytes: std::vec::IntoIter<u8>,
}

impl ScriptedBytes {
    pub fn new(script: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: script.into().into_iter(),
        }
    }
}

impl ByteSource for ScriptedBytes {
    fn read_byte(&mut self) -> Option<u8> {
        self.bytes.next()
    }
}
