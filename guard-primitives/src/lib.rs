//! Core shared types for the guardkit call-capture runtime.

#![warn(missing_docs, clippy::pedantic)]

mod callable;
mod error;

/// Opaque capability handle for the user-supplied invocation function.
pub use callable::LlmCallable;
/// Error type and result alias for the callable boundary.
pub use error::{CallableError, CallableResult};
