use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Transitions are one-way: `Open` moves to `Fulfilled`, `CancelledUser` or
/// `CancelledByNewOrder`; `Executed` is reachable only from `Fulfilled`, once
/// settlement is confirmed externally. No state is re-openable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order is live and may be cancelled or fulfilled
    Open,
    /// Order has been matched; settlement not yet confirmed
    Fulfilled,
    /// Cancelled by the offerer
    CancelledUser,
    /// Superseded by a newer listing or auction on the same asset
    CancelledByNewOrder,
    /// Settlement confirmed; terminal
    Executed,
}

impl OrderStatus {
    /// Returns true if the order is still live
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Open)
    }

    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::CancelledUser | OrderStatus::CancelledByNewOrder | OrderStatus::Executed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_is_the_only_open_state() {
        assert!(OrderStatus::Open.is_open());
        assert!(!OrderStatus::Fulfilled.is_open());
        assert!(!OrderStatus::CancelledUser.is_open());
        assert!(!OrderStatus::CancelledByNewOrder.is_open());
        assert!(!OrderStatus::Executed.is_open());
    }

    #[test]
    fn fulfilled_is_not_terminal() {
        // Fulfilled still awaits execution confirmation
        assert!(!OrderStatus::Fulfilled.is_terminal());
        assert!(OrderStatus::Executed.is_terminal());
        assert!(OrderStatus::CancelledUser.is_terminal());
        assert!(OrderStatus::CancelledByNewOrder.is_terminal());
    }
}
