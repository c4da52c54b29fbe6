//! Periodic sample timer.
//!
//! On the controller a hardware ticker raises the sample tick from
//! interrupt context.  On the host, [`ThreadTicker`] approximates it with
//! a dedicated thread that sleeps one period per tick while armed and
//! stays parked (no polling) while disarmed.
//!
//! The timer only raises [`Signals::sample_tick`]; the acquisition task
//! does the actual sampling.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use core::time::Duration;
use std::sync::Arc;
use std::thread::JoinHandle;

use log::{info, warn};

use crate::app::ports::TickSource;
use crate::drivers::task::spawn_named;
use crate::error::Result;
use crate::events::Signals;

const TICKER_STACK_KB: usize = 32;

struct TickerState {
    armed: AtomicBool,
    period_us: AtomicU64,
    shutdown: AtomicBool,
}

/// Host tick source backed by a parked thread.
pub struct ThreadTicker {
    state: Arc<TickerState>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadTicker {
    /// Spawn the (initially disarmed) timer thread.
    pub fn start(signals: Arc<Signals>) -> Result<Self> {
        let state = Arc::new(TickerState {
            armed: AtomicBool::new(false),
            period_us: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        });

        let worker_state = Arc::clone(&state);
        let thread = spawn_named("sample-timer", TICKER_STACK_KB, move || {
            run(&worker_state, &signals);
        })?;

        info!("hw_timer(sim): sample timer ready");
        Ok(Self {
            state,
            thread: Some(thread),
        })
    }

    pub fn is_armed(&self) -> bool {
        self.state.armed.load(Ordering::Acquire)
    }

    fn wake(&self) {
        if let Some(thread) = &self.thread {
            thread.thread().unpark();
        }
    }
}

fn run(state: &TickerState, signals: &Signals) {
    loop {
        if state.shutdown.load(Ordering::Acquire) {
            break;
        }
        if !state.armed.load(Ordering::Acquire) {
            std::thread::park();
            continue;
        }

        let period = Duration::from_micros(state.period_us.load(Ordering::Acquire));
        std::thread::sleep(period);

        // Re-check: a disarm during the sleep must not produce a tick.
        if state.armed.load(Ordering::Acquire) && !state.shutdown.load(Ordering::Acquire) {
            signals.sample_tick.signal(());
        }
    }
}

impl TickSource for ThreadTicker {
    fn arm(&mut self, period: Duration) {
        let micros = u64::try_from(period.as_micros()).unwrap_or(u64::MAX);
        self.state.period_us.store(micros.max(1), Ordering::Release);
        self.state.armed.store(true, Ordering::Release);
        self.wake();
    }

    fn disarm(&mut self) {
        self.state.armed.store(false, Ordering::Release);
    }
}

impl Drop for ThreadTicker {
    fn drop(&mut self) {
        self.state.shutdown.store(true, Ordering::Release);
        self.state.armed.store(false, Ordering::Release);
        self.wake();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("hw_timer(sim): timer thread panicked");
            }
        }
    }
}
