//! Temporal buffering for a rapidly-changing input value.
//!
//! Each new value restarts the deadline and replaces any pending value
//! (last-write-wins, intermediate values are never queued). The settled
//! value is emitted by `poll` once the delay has elapsed with no newer
//! write. There is no timer thread; the host's event loop drives `poll`
//! with its notion of "now", which also makes the scheduler trivially
//! cancellable and deterministic under test.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Delays propagation of a changing value until it has been stable for
/// the configured interval.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new value, cancelling any previously pending one.
    pub fn update(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Emit the pending value if its deadline has passed. Returns at
    /// most one value per settled write.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let settled = matches!(&self.pending, Some(p) if p.deadline <= now);
        if settled {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Drop any pending value without emitting it. A cancelled debounce
    /// never fires, matching teardown semantics.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
