//! Wall-clock abstraction.
//!
//! The store stamps persisted envelopes and sweeps expired entries against a
//! [`Clock`]. Production code uses [`SystemClock`]; tests drive a
//! [`ManualClock`] so expiry can be checked without waiting seven days.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one day.
pub const DAY_MS: u64 = 24 * 60 * 60 * 1000;

/// Source of epoch-millisecond timestamps.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A manually advanced clock.
///
/// Clones share the same underlying time, so a test can keep one handle
/// while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    current_ms: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Create a clock fixed at `start_ms`.
    pub fn at_ms(start_ms: u64) -> Self {
        Self {
            current_ms: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move time forward by `ms`.
    pub fn advance_ms(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get().saturating_add(ms));
    }

    /// Jump to an absolute time.
    pub fn set_ms(&self, ms: u64) {
        self.current_ms.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}
