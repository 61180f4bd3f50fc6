use bazaar_core::Timestamp;
use bazaar_ports::Clock;
use chrono::Utc;

/// Real system clock for production use
///
/// Returns wall-clock time truncated to whole seconds, the granularity all
/// engine timing rules are defined in.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().timestamp().max(0) as Timestamp
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic_enough() {
        let clock = SystemClock::new();
        let t1 = clock.now();
        let t2 = clock.now();
        assert!(t2 >= t1);
        // Sanity: later than 2020-01-01
        assert!(t1 > 1_577_836_800);
    }
}
