pub mod calendar;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "cash_flow")]
pub mod cash_flow;

pub use error::LivestockFinanceError;
pub use types::*;

/// Standard result type for all livestock-finance operations
pub type LivestockFinanceResult<T> = Result<T, LivestockFinanceError>;
