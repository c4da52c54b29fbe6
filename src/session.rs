//! Operator session. Wires the workers together and runs the console.
//!
//! ```text
//!  ┌──────────────────┐  wait_tick   ┌─────────────────────────┐
//!  │ acquisition task │◀─────────────│ TickSource (armed/idle) │
//!  └───────┬──────────┘              └─────────────────────────┘
//!          │ on_tick → store.insert
//!          ▼
//!  ┌──────────────┐  exchange(Line|Key)  ┌────────────┐  read_byte
//!  │ command loop │─────────────────────▶│ input task │◀──────────── ByteSource
//!  │  (caller)    │◀─────────────────────│ LineEditor │
//!  └──────┬───────┘  Command|Key|Closed  └────────────┘
//!         │ dispatch
//!         ▼
//!  CommandDispatcher ──▶ SharedStore / AcquisitionController
//! ```
//!
//! The command loop runs on the calling thread.  It ends when the input
//! task reports [`InputReply::Closed`]; sampling is then switched off and
//! both workers are joined.

use core::fmt::Write;
use std::sync::Arc;

use embedded_hal::digital::StatefulOutputPin;
use log::{debug, info, warn};

use crate::acquisition::AcquisitionController;
use crate::app::commands::Command;
use crate::app::dispatcher::{CommandDispatcher, EOL};
use crate::app::line::{LineEditor, LineStatus, is_terminator};
use crate::app::outcome::USAGE;
use crate::app::ports::{ByteSource, ConsolePort, SensorPort, TickSource};
use crate::config::{LINE_MAX_LEN, SystemConfig};
use crate::drivers::task::{join_named, spawn_named};
use crate::error::Result;
use crate::events::{InputReply, InputRequest, Signals};
use crate::store::SharedStore;

const ACQUISITION_TASK: &str = "acquisition";
const INPUT_TASK: &str = "console-input";

const ACQUISITION_STACK_KB: usize = 32;
const INPUT_STACK_KB: usize = 32;

/// One console session over a shared store and acquisition controller.
pub struct Session<const N: usize, T, P> {
    config: SystemConfig,
    signals: Arc<Signals>,
    store: Arc<SharedStore<N>>,
    acquisition: Arc<AcquisitionController<T, P>>,
}

impl<const N: usize, T, P> Session<N, T, P>
where
    T: TickSource + Send + 'static,
    P: StatefulOutputPin + Send + 'static,
{
    pub fn new(
        config: SystemConfig,
        signals: Arc<Signals>,
        store: Arc<SharedStore<N>>,
        acquisition: Arc<AcquisitionController<T, P>>,
    ) -> Self {
        Self {
            config,
            signals,
            store,
            acquisition,
        }
    }

    /// Run until `input` is exhausted, then hand back `output`.
    ///
    /// Console write failures are logged and the session carries on; only
    /// worker spawn/join failures end it early.
    pub fn run<S, B, W>(self, sensor: S, input: B, mut output: W) -> Result<W>
    where
        S: SensorPort + Send + 'static,
        B: ByteSource + Send + 'static,
        W: Write,
    {
        let acquisition_worker = {
            let signals = Arc::clone(&self.signals);
            let store = Arc::clone(&self.store);
            let acquisition = Arc::clone(&self.acquisition);
            spawn_named(ACQUISITION_TASK, ACQUISITION_STACK_KB, move || {
                acquisition_task(&signals, &acquisition, sensor, &store);
            })?
        };
        let input_worker = {
            let signals = Arc::clone(&self.signals);
            spawn_named(INPUT_TASK, INPUT_STACK_KB, move || input_task(&signals, input))?
        };

        if self.config.show_banner
            && write!(output, "{EOL}Valid commands you can use are: {USAGE}{EOL}").is_err()
        {
            warn!("Session: banner write failed");
        }
        if self.config.sampling_on_boot {
            self.acquisition.enable();
        }

        let mut dispatcher =
            CommandDispatcher::new(Arc::clone(&self.store), Arc::clone(&self.acquisition));
        let mut console = HandoffConsole {
            signals: &self.signals,
            out: &mut output,
            closed: false,
        };
        let mut handled: u32 = 0;

        while !console.closed {
            let Some(command) = console.next_command() else {
                break;
            };
            match dispatcher.dispatch(command, &mut console) {
                Ok(outcome) => {
                    if write!(console, "{outcome}{EOL}").is_err() {
                        warn!("Session: console write failed");
                    }
                    if outcome.mutated() {
                        info!("Session: {:?} -> {:?}", command, outcome);
                    } else {
                        debug!("Session: {:?} -> {:?}", command, outcome);
                    }
                }
                Err(_) => warn!("Session: console write failed during {:?}", command),
            }
            handled = handled.saturating_add(1);
        }

        info!("Session: input closed after {} commands, shutting down", handled);
        self.acquisition.disable();
        self.signals.request_stop();
        join_named(ACQUISITION_TASK, acquisition_worker)?;
        join_named(INPUT_TASK, input_worker)?;

        let stats = self.store.stats();
        info!(
            "Session: finished (count={}/{}, avg={:.4})",
            stats.count, stats.capacity, stats.average
        );
        Ok(output)
    }
}

// ── Workers ───────────────────────────────────────────────────

fn acquisition_task<S, T, P, const N: usize>(
    signals: &Signals,
    acquisition: &AcquisitionController<T, P>,
    mut sensor: S,
    store: &SharedStore<N>,
) where
    S: SensorPort,
    T: TickSource,
    P: StatefulOutputPin,
{
    let mut samples: u64 = 0;
    loop {
        signals.wait_tick();
        if signals.stop_requested() {
            break;
        }
        if acquisition.on_tick(&mut sensor, store).is_some() {
            samples += 1;
        }
    }
    info!("Acquisition: task stopped after {} samples", samples);
}

fn input_task<B: ByteSource>(signals: &Signals, mut input: B) {
    let mut editor: LineEditor<LINE_MAX_LEN> = LineEditor::new();
    loop {
        let reply = match signals.wait_request() {
            InputRequest::Line => read_line(&mut editor, &mut input).map(|line| {
                debug!("Console: line {:?}", String::from_utf8_lossy(&line));
                InputReply::Command(Command::parse(&line))
            }),
            InputRequest::Key => read_key(&mut input).map(|key| {
                editor.skip_next_terminator();
                InputReply::Key(key)
            }),
        };
        match reply {
            Some(reply) => signals.input_reply.signal(reply),
            None => {
                signals.input_reply.signal(InputReply::Closed);
                break;
            }
        }
    }
    debug!("Console: input task exited");
}

/// Feed bytes until a line completes; `None` once the source is exhausted.
fn read_line<B: ByteSource, const L: usize>(
    editor: &mut LineEditor<L>,
    input: &mut B,
) -> Option<heapless::Vec<u8, L>> {
    loop {
        let byte = input.read_byte()?;
        if editor.feed(byte) == LineStatus::Complete {
            return Some(editor.take());
        }
    }
}

/// Next keystroke that is not a line terminator.  The LF of the command
/// line's CR LF pair may still be pending when the answer is requested.
fn read_key<B: ByteSource>(input: &mut B) -> Option<u8> {
    loop {
        let byte = input.read_byte()?;
        if !is_terminator(byte) {
            return Some(byte);
        }
    }
}

// ── Console ───────────────────────────────────────────────────

/// Console seen by the dispatcher: writes go straight to the output,
/// keystrokes are requested from the input task.
struct HandoffConsole<'a, W> {
    signals: &'a Signals,
    out: &'a mut W,
    closed: bool,
}

impl<W: Write> HandoffConsole<'_, W> {
    /// Prompt for and wait on the next command.
    fn next_command(&mut self) -> Option<Command> {
        if self.write_str("-> ").is_err() {
            warn!("Session: prompt write failed");
        }
        loop {
            match self.signals.exchange(InputRequest::Line) {
                InputReply::Command(command) => {
                    if self.write_str(EOL).is_err() {
                        warn!("Session: console write failed");
                    }
                    return Some(command);
                }
                InputReply::Closed => {
                    self.closed = true;
                    return None;
                }
                // Only a key request is answered with a key.
                InputReply::Key(_) => continue,
            }
        }
    }
}

impl<W: Write> Write for HandoffConsole<'_, W> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.out.write_str(s)
    }
}

impl<W: Write> ConsolePort for HandoffConsole<'_, W> {
    fn read_key(&mut self) -> Option<u8> {
        if self.closed {
            return None;
        }
        match self.signals.exchange(InputRequest::Key) {
            InputReply::Key(key) => Some(key),
            InputReply::Closed => {
                self.closed = true;
                None
            }
            InputReply::Command(_) => None,
        }
    }
}
