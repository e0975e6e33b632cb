//! Resolver error types.
//!
//! Resolvers propagate transport and Gateway-reported failures to the
//! caller; decode- and cache-level problems are absorbed where they
//! occur with best-effort partial results.

use cave_gateway::GatewayError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type alias for resolver operations.
pub type ResolverResult<T> = Result<T, ResolverError>;
