//! Mutual exclusion for the single in-flight completion.
//!
//! The UI also disables the send control while a request is outstanding,
//! but the guard is what makes a double send impossible: a second trigger
//! fails `try_acquire` no matter where it came from.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Hands out at most one [`RequestPermit`] at a time.
#[derive(Clone, Default)]
pub struct RequestGuard {
    in_flight: Arc<AtomicBool>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the in-flight slot. Returns `None` if a request already
    /// holds it.
    pub fn try_acquire(&self) -> Option<RequestPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RequestPermit {
                in_flight: Arc::clone(&self.in_flight),
            })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Proof that the holder owns the in-flight slot. Dropping releases it.
pub struct RequestPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for RequestPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}
