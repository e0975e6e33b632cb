//! Gateway error types.

use thiserror::Error;

/// Errors from talking to the Gateway.
///
/// Transport and Gateway-reported failures are distinct so callers can
/// tell "the request never made it" from "the Gateway said no". Neither
/// is retried automatically — callers decide.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Gateway error ({status}): {message}")]
    Gateway { status: u16, message: String },

    #[error("Response decode error: {0}")]
    ResponseDecode(String),
}

/// Result type alias for Gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
