//! Error types for random draws and selection
//!
//! Every failure is raised synchronously, before the generator is advanced, so
//! a rejected call never changes the random stream seen by later calls.

use thiserror::Error;

/// Errors returned by generators, the draw facade and selection routines
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A bound, range or weight sum was not strictly positive
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not available on this generator or structure
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::debug!(reason = %msg, "rejected random draw");
        Error::InvalidArgument(msg)
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        Error::UnsupportedOperation(msg.into())
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
