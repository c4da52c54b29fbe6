//! Worker wake signals.
//!
//! Each worker blocks on exactly one signal, does a bounded piece of
//! work, and blocks again:
//!
//! ```text
//! ┌─────────────┐ sample_tick  ┌──────────────────┐
//! │ Tick source │─────────────▶│ Acquisition task │──▶ store.insert
//! └─────────────┘              └──────────────────┘
//!
//! ┌──────────────┐ input_request ┌──────────────┐
//! │ Command task │──────────────▶│  Input task  │◀── operator bytes
//! │  (dispatch)  │◀──────────────│ (line edit)  │
//! └──────────────┘  input_reply  └──────────────┘
//! ```
//!
//! Signals are single-slot: a second tick raised before the first is
//! consumed coalesces with it.  The input pair is a handoff with at most
//! one outstanding request, never a queue.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::app::commands::Command;

/// What the command task wants from the input task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRequest {
    /// Compose and parse one command line.
    Line,
    /// Read a single keypress (y/n confirmation).
    Key,
}

/// What the input task hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputReply {
    Command(Command),
    Key(u8),
    /// The byte source is exhausted; the input task has exited.
    Closed,
}

/// The set of wake signals shared by the session's workers.
pub struct Signals {
    /// Raised by the tick source once per sampling period.
    pub sample_tick: Signal<CriticalSectionRawMutex, ()>,
    /// Command task → input task.
    pub input_request: Signal<CriticalSectionRawMutex, InputRequest>,
    /// Input task → command task.
    pub input_reply: Signal<CriticalSectionRawMutex, InputReply>,
    stop: AtomicBool,
}

impl Default for Signals {
    fn default() -> Self {
        Self::new()
    }
}

impl Signals {
    pub const fn new() -> Self {
        Self {
            sample_tick: Signal::new(),
            input_request: Signal::new(),
            input_reply: Signal::new(),
            stop: AtomicBool::new(false),
        }
    }

    /// Ask the acquisition task to exit.
    ///
    /// The flag is checked after every wake, so a tick that overwrites the
    /// wake-up cannot hide the request.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.sample_tick.signal(());
    }

    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Block the calling thread until the next tick.
    pub fn wait_tick(&self) {
        futures_lite::future::block_on(self.sample_tick.wait());
    }

    /// Block the calling thread for the next input request.
    pub fn wait_request(&self) -> InputRequest {
        futures_lite::future::block_on(self.input_request.wait())
    }

    /// Issue a request and block for its reply.
    pub fn exchange(&self, request: InputRequest) -> InputReply {
        self.input_request.signal(request);
        futures_lite::future::block_on(self.input_reply.wait())
    }
}
