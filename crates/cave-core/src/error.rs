//! Error types for cave-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Decimal parse error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
