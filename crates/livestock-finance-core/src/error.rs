use thiserror::Error;

#[derive(Debug, Error)]
pub enum LivestockFinanceError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid period: month {month} of year {year} is outside the supported calendar")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("Missing baseline for lot '{lot}': {field} must be set before projecting")]
    MissingBaseline { lot: String, field: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LivestockFinanceError {
    fn from(e: serde_json::Error) -> Self {
        LivestockFinanceError::SerializationError(e.to_string())
    }
}
