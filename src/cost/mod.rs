pub mod breakdown;
pub mod formulas;
pub mod memo;
pub mod strategy;

pub use breakdown::CostBreakdown;
pub use formulas::estimate;
pub use memo::CostMemo;
pub use strategy::{PricingTier, Strategy};
