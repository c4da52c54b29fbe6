//! Sample history: fixed-capacity ring with a running average.
//!
//! [`SampleStore`] is the plain data structure (no threads, no I/O).
//! [`SharedStore`] wraps it in the one lock that both the acquisition
//! worker (producer) and the command worker (consumer) go through.
//!
//! ```text
//!            oldest            newest (next write)
//!              │                 │
//!   ┌────┬────┬▼───┬────┬────┬───▼┬────┐
//!   │    │    │ s0 │ s1 │ s2 │    │    │   count = 3
//!   └────┴────┴────┴────┴────┴────┴────┘
//! ```
//!
//! `insert` adjusts the running sum in O(1); `evict_oldest` re-sums the
//! survivors from scratch.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::trace;

// ───────────────────────────────────────────────────────────────
// Clamp reporting
// ───────────────────────────────────────────────────────────────

/// A requested count that had to be reduced to what the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped {
    /// What the caller asked for.
    pub requested: i64,
    /// What was actually used (the sample count at the time).
    pub effective: usize,
}

/// Result of [`SampleStore::evict_oldest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    pub removed: usize,
    pub clamped: Option<Clamped>,
}

// ───────────────────────────────────────────────────────────────
// SampleStore
// ───────────────────────────────────────────────────────────────

/// Fixed-capacity circular sample history.
#[derive(Debug, Clone)]
pub struct SampleStore<const N: usize> {
    slots: [f32; N],
    /// Slot holding the oldest valid sample.
    oldest: usize,
    /// Slot the next insert writes (one past the newest sample).
    newest: usize,
    count: usize,
    sum: f64,
    average: f64,
}

impl<const N: usize> Default for SampleStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleStore<N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "sample store capacity must be non-zero") };
        Self {
            slots: [0.0; N],
            oldest: 0,
            newest: 0,
            count: 0,
            sum: 0.0,
            average: 0.0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Mean of the retained samples; `0.0` when empty.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Append a sample, evicting the oldest one when full.  O(1).
    pub fn insert(&mut self, value: f32) {
        if self.count == N {
            self.sum -= f64::from(self.slots[self.oldest]);
            self.oldest = (self.oldest + 1) % N;
        } else {
            self.count += 1;
        }

        self.slots[self.newest] = value;
        self.newest = (self.newest + 1) % N;
        self.sum += f64::from(value);
        self.average = self.sum / self.count as f64;
    }

    /// Lazily walk the `n` oldest samples, oldest first.
    ///
    /// A negative `n`, or one larger than the current count, is clamped
    /// to the count and reported through [`Readout::clamped`].
    pub fn read_oldest_to_newest(&self, n: i64) -> Readout<'_, N> {
        let (len, clamped) = self.clamp(n);
        Readout {
            samples: Samples {
                store: self,
                pos: 0,
                len,
            },
            clamped,
            average: self.average,
        }
    }

    /// Drop the `n` oldest samples and re-sum what remains.  O(count).
    pub fn evict_oldest(&mut self, n: i64) -> Eviction {
        let (removed, clamped) = self.clamp(n);

        self.oldest = (self.oldest + removed) % N;
        self.count -= removed;
        if self.count == 0 {
            self.newest = self.oldest;
        }
        self.recompute_average();

        Eviction { removed, clamped }
    }

    /// Iterate every retained sample, oldest first.
    pub fn iter(&self) -> Samples<'_, N> {
        Samples {
            store: self,
            pos: 0,
            len: self.count,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn clamp(&self, n: i64) -> (usize, Option<Clamped>) {
        match usize::try_from(n) {
            Ok(n) if n <= self.count => (n, None),
            _ => (
                self.count,
                Some(Clamped {
                    requested: n,
                    effective: self.count,
                }),
            ),
        }
    }

    fn recompute_average(&mut self) {
        self.sum = self.iter().map(f64::from).sum();
        self.average = if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        };
    }
}

// ───────────────────────────────────────────────────────────────
// Readout / iterator
// ───────────────────────────────────────────────────────────────

/// Borrowed view returned by [`SampleStore::read_oldest_to_newest`].
#[derive(Debug, Clone)]
pub struct Readout<'a, const N: usize> {
    pub samples: Samples<'a, N>,
    pub clamped: Option<Clamped>,
    /// Running average at the time of the read.
    pub average: f64,
}

/// Oldest-to-newest iterator over a prefix of the ring.
///
/// Cloning restarts from the clone point, so a readout can be walked
/// more than once.
#[derive(Debug, Clone)]
pub struct Samples<'a, const N: usize> {
    store: &'a SampleStore<N>,
    pos: usize,
    len: usize,
}

impl<const N: usize> Iterator for Samples<'_, N> {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.pos >= self.len {
            return None;
        }
        let slot = (self.store.oldest + self.pos) % N;
        self.pos += 1;
        Some(self.store.slots[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.len - self.pos;
        (left, Some(left))
    }
}

impl<const N: usize> ExactSizeIterator for Samples<'_, N> {}

// ───────────────────────────────────────────────────────────────
// SharedStore
// ───────────────────────────────────────────────────────────────

/// Point-in-time summary of the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreStats {
    pub count: usize,
    pub capacity: usize,
    pub average: f64,
}

/// The single lock guarding a [`SampleStore`].
///
/// Every method takes the lock for exactly one read-modify-write and
/// releases it before returning.  A panic in another holder does not
/// wedge the store: the poisoned guard is recovered, since every
/// mutation leaves the ring consistent before it can panic.
#[derive(Debug, Default)]
pub struct SharedStore<const N: usize> {
    inner: Mutex<SampleStore<N>>,
}

impl<const N: usize> SharedStore<N> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SampleStore::new()),
        }
    }

    /// Producer side: append one sample.
    pub fn insert(&self, value: f32) {
        let mut store = self.lock();
        store.insert(value);
        trace!(
            "Store: insert {:.4} (count={}, avg={:.4})",
            value,
            store.len(),
            store.average()
        );
    }

    /// Consumer side: drop the `n` oldest samples.
    pub fn evict_oldest(&self, n: i64) -> Eviction {
        self.lock().evict_oldest(n)
    }

    /// Run `f` against a consistent readout while the lock is held.
    ///
    /// Keep `f` short; the producer is blocked until it returns.
    pub fn read<R>(&self, n: i64, f: impl FnOnce(Readout<'_, N>) -> R) -> R {
        let store = self.lock();
        f(store.read_oldest_to_newest(n))
    }

    pub fn stats(&self) -> StoreStats {
        let store = self.lock();
        StoreStats {
            count: store.len(),
            capacity: N,
            average: store.average(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SampleStore<N>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
