//! Clock implementations for the Bazaar marketplace engine.

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;
