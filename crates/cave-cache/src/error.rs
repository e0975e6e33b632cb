//! Cache error types.
//!
//! These never cross the crate boundary: the public cache surface absorbs
//! them, logging writes that failed and treating unreadable entries as
//! misses.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub(crate) type CacheResult<T> = Result<T, CacheError>;
