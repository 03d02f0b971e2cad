//! Call-input capture and interop for the guardkit runtime.
//!
//! One [`CallInputs`] record captures exactly what was handed to the
//! underlying model for a single invocation attempt; each retry produces
//! its own record. Records export to a stable wire shape
//! ([`WireCallInputs`]) with credential-shaped keyword arguments masked,
//! and can be reconstructed from it minus the in-process callable handle.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod inputs;
mod redact;
mod wire;

pub use error::{HistoryError, HistoryResult};
pub use inputs::{CallInputs, CallInputsBuilder, InvocationInputs};
pub use redact::redact_kwargs;
pub use wire::WireCallInputs;
