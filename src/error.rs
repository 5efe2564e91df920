use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("invalid request: {reason}")]
    Validation { reason: String },

    #[error("property not found: {id}")]
    PropertyNotFound { id: String },

    #[error("booking not found: {id}")]
    BookingNotFound { id: String },

    #[error("not authorized to perform this action")]
    Forbidden,

    #[error("{date} is not available for this property")]
    DateNotAvailable { date: NaiveDate },

    #[error("requested dates overlap an existing booking")]
    DateRangeConflict,

    #[error("bookings cannot be changed within {hours} hours of check-in")]
    CancellationWindow { hours: i64 },

    #[error("credential rejected: {reason}")]
    Auth { reason: String },

    /// Constraint backstop tripped at the store; the lifecycle retries once
    /// before surfacing `DateRangeConflict`.
    #[error("store rejected conflicting write: {reason}")]
    StoreConflict { reason: String },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BookingError>;
