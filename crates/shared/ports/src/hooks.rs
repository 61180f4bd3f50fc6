use bazaar_core::{OrderContent, OrderHash};
use thiserror::Error;

/// Failure raised by a lifecycle hook.
///
/// Hook failures abort the bracketed operation exactly like core failures;
/// there is no error isolation between a hook and the operation around it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("hook rejected operation: {0}")]
pub struct HookError(pub String);

pub type HookResult = Result<(), HookError>;

/// Port for pluggable before/after behavior around each engine operation.
///
/// Invoked synchronously. A before-hook failure prevents any mutation; an
/// after-hook failure propagates to the caller with the transition already
/// committed. The default implementation of every method is a no-op.
pub trait LifecycleHooks: Send + Sync {
    fn before_create(&self, _content: &OrderContent) -> HookResult {
        Ok(())
    }

    fn after_create(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }

    fn before_cancel(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }

    fn after_cancel(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }

    fn before_fulfill(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }

    fn after_fulfill(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }

    fn before_validate_execution(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }

    fn after_validate_execution(&self, _hash: &OrderHash) -> HookResult {
        Ok(())
    }
}

/// Default hook set that approves everything
pub struct NoopHooks;

impl LifecycleHooks for NoopHooks {}
