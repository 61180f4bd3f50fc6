use serde::{Deserialize, Serialize};

/// Direction of value flow declared by the offerer.
///
/// The route, together with token id presence and quantity, determines the
/// order type at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Offerer gives up the asset in exchange for currency (listing side)
    AssetToCurrency,
    /// Offerer spends currency to acquire the asset (offer side)
    CurrencyToAsset,
    /// Fungible limit order, buy side
    FungibleBuy,
    /// Fungible limit order, sell side
    FungibleSell,
}

impl Route {
    /// Returns the opposite fungible route, if this is a fungible route
    pub fn fungible_opposite(&self) -> Option<Route> {
        match self {
            Route::FungibleBuy => Some(Route::FungibleSell),
            Route::FungibleSell => Some(Route::FungibleBuy),
            _ => None,
        }
    }

    /// Stable tag used by the canonical hash encoding
    pub(crate) fn tag(&self) -> u8 {
        match self {
            Route::AssetToCurrency => 0,
            Route::CurrencyToAsset => 1,
            Route::FungibleBuy => 2,
            Route::FungibleSell => 3,
        }
    }
}
