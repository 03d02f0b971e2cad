//! Shared error definitions for the callable boundary.

use thiserror::Error;

/// Result alias used by callable implementations.
pub type CallableResult<T> = std::result::Result<T, CallableError>;

/// Errors surfaced by user-supplied invocation functions.
#[derive(Debug, Error)]
pub enum CallableError {
    /// The underlying invocation failed.
    #[error("llm invocation failed: {reason}")]
    Invocation {
        /// Human-readable reason reported by the callable.
        reason: String,
    },
}

impl CallableError {
    /// Convenience constructor for invocation failures.
    #[must_use]
    pub fn invocation(reason: impl Into<String>) -> Self {
        Self::Invocation {
            reason: reason.into(),
        }
    }
}
