//! Error types for the cache facades
//!
//! Provides unified error handling using thiserror.
//!
//! Only caller mistakes are errors. Store failures travel as `bool` results and
//! unreadable records are reported as misses.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache facades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key contains a reserved character
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Item handle was not issued by the pool it is being saved to
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache facades.
pub type Result<T> = std::result::Result<T, CacheError>;
