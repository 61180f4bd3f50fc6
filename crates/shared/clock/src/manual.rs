use std::sync::atomic::{AtomicU64, Ordering};

use bazaar_core::Timestamp;
use bazaar_ports::Clock;

/// Manually advanced clock for deterministic tests
///
/// Time only moves when the test says so, which makes expiry, anti-snipe and
/// grace-window boundaries exactly reproducible.
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Jump the clock to an absolute time
    pub fn set(&self, now: Timestamp) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
