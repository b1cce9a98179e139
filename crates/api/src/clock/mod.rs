// Path: crates/api/src/clock/mod.rs
//! Sources of the ordinal validity windows are checked against.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically non-decreasing ordinal, such as a block height or a logical tick.
pub trait OrdinalSource: Send + Sync {
    fn current_ordinal(&self) -> u64;
}

/// An ordinal that is advanced externally, e.g. by a block-height feed.
#[derive(Debug, Default)]
pub struct ManualClock {
    ordinal: AtomicU64,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            ordinal: AtomicU64::new(start),
        }
    }

    /// Moves the ordinal forward to `ordinal`. Attempts to move backwards are ignored.
    pub fn advance_to(&self, ordinal: u64) {
        self.ordinal.fetch_max(ordinal, Ordering::SeqCst);
    }

    /// Moves the ordinal forward by `delta`, saturating at `u64::MAX`.
    pub fn tick(&self, delta: u64) -> u64 {
        let prev = self
            .ordinal
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| {
                Some(v.saturating_add(delta))
            })
            .unwrap_or_else(|v| v);
        prev.saturating_add(delta)
    }
}

impl OrdinalSource for ManualClock {
    fn current_ordinal(&self) -> u64 {
        self.ordinal.load(Ordering::SeqCst)
    }
}
