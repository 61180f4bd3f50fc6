mod fee;
mod order;
mod order_status;
mod order_type;
mod route;
mod settlement;

pub use fee::{FeeConfig, FeeRatio, FeeSplit};
pub use order::OrderContent;
pub use order_status::OrderStatus;
pub use order_type::OrderType;
pub use route::Route;
pub use settlement::SettlementInstruction;
