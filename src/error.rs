use crate::models::Quantity;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A secondary feed does not line up with the primary feed.
    #[error("Alignment error at row {row}: {quantity} feed is misaligned at byte offset {offset}")]
    Alignment {
        row: usize,
        quantity: Quantity,
        offset: usize,
    },

    #[error("Parse error in {source_name} at byte offset {offset}: '{raw}'")]
    Parse {
        source_name: String,
        offset: usize,
        raw: String,
    },

    #[error("Cannot compute statistics over an empty {quantity} column")]
    EmptyInput { quantity: Quantity },

    #[error("Unable to allocate storage for {quantity} column: {message}")]
    Allocation { quantity: Quantity, message: String },

    #[error("Improper date format: '{0}' (use YYYYMMDD or 'today')")]
    InvalidDate(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Upstream data unavailable for {url}: {reason}")]
    UpstreamUnavailable { url: String, reason: String },
}
