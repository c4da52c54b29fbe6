//! Named worker-thread spawning.
//!
//! On the controller every worker is an RTOS task with an explicit stack
//! budget; on the host the same call maps onto a named `std::thread` so
//! the workers show up by name in debuggers and panic messages.

use std::thread::{Builder, JoinHandle};

use crate::error::{Error, Result};

/// Spawn a named worker thread with an explicit stack size.
pub fn spawn_named<F>(name: &'static str, stack_kb: usize, f: F) -> Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    log::info!("Spawning '{}' (stack={}KB)", name, stack_kb);
    Builder::new()
        .name(name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .map_err(|e| {
            log::error!("Spawn of '{}' failed: {}", name, e);
            Error::Spawn(name)
        })
}

/// Join a worker, mapping a panic into [`Error::WorkerPanicked`].
pub fn join_named(name: &'static str, handle: JoinHandle<()>) -> Result<()> {
    handle.join().map_err(|_| Error::WorkerPanicked(name))
}
