//! Fuzz target: `LineEditor::feed` + `Command::parse`
//!
//! Drives arbitrary keystroke sequences through the console line editor
//! and parses every completed line.  Asserts that the editor never
//! exceeds its bound and that parsing never panics.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use daqloop::app::commands::{Command, parse_integer};
use daqloop::app::line::{LineEditor, LineStatus};
use daqloop::config::LINE_MAX_LEN;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut editor: LineEditor<LINE_MAX_LEN> = LineEditor::new();

    for &byte in data {
        if editor.feed(byte) == LineStatus::Complete {
            let line = editor.take();
            assert!(line.len() <= LINE_MAX_LEN, "line exceeds LINE_MAX_LEN");
            let _ = Command::parse(&line);
        }
    }

    // Whole-input parse: operands longer than any console line.
    let _ = Command::parse(data);
    let _ = parse_integer(data);
});
