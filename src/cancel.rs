//! Cooperative cancellation of a running search.
//!
//! The search polls its [Cancellation] signal once per expanded node. A [CancellationSource]
//! hands out cloneable [CancellationToken]s so a UI thread can stop a search running elsewhere.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// A signal that is never raised.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

/// The control handle that raises the signal.
#[derive(Debug, Default)]
pub struct CancellationSource {
    cancelled: Arc<AtomicBool>,
}

/// Observes the state of the [CancellationSource] it came from. Cheap to clone.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSource {
    pub fn new() -> CancellationSource {
        CancellationSource::default()
    }
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }
    /// Raises the signal for every token of this source. Searches stop at their next poll.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Cancellation for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
