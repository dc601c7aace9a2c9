use portfolio_shared::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server rejected submission (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Storage(String),

    #[error("Invalid root margin '{0}'")]
    InvalidRootMargin(String),

    #[error("Threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("Unknown project icon '{0}'")]
    UnknownIcon(String),
}
