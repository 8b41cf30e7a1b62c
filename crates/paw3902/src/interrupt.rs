//! Motion-ready signalling.
//!
//! The sensor's MOT output can be awaited directly through the driver, or an
//! interrupt handler can raise a [`DataReadyFlag`] that the sampling task
//! polls.

use core::sync::atomic::{AtomicBool, Ordering};

/// Error returned while waiting on the motion pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptWaitError<E> {
    /// Motion pin was not provided to the driver.
    Missing,
    /// Underlying pin error.
    Pin(E),
}

/// Single-producer, single-consumer "new data" flag.
///
/// Set from interrupt context with [`signal`](Self::signal), consumed by the
/// sampling loop with [`take`](Self::take).
#[derive(Debug, Default)]
pub struct DataReadyFlag {
    ready: AtomicBool,
}

impl DataReadyFlag {
    /// Creates a cleared flag.
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
        }
    }

    /// Marks new data as available.
    pub fn signal(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Returns whether the flag is set without clearing it.
    pub fn is_set(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Clears the flag and returns whether it was set.
    pub fn take(&self) -> bool {
        // Load-then-clear: no compare-and-swap on thumbv6m.
        if self.ready.load(Ordering::Acquire) {
            self.ready.store(false, Ordering::Release);
            true
        } else {
            false
        }
    }
}
