use bazaar_core::Timestamp;

/// Port for time abstraction
///
/// The engine reads time exactly once per operation and only compares it.
/// Different implementations support:
/// - Real system time for production
/// - Manually advanced time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}

// Shared clocks stay drivable from outside the component that owns them
impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
