//! Call-capture and prompt-templating core for LLM output validation.
//!
//! Depend on this crate via `cargo add guardkit`. It bundles the internal
//! crates behind feature flags so orchestration layers can enable only the
//! components they need.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use guard_primitives as primitives;

/// Prompt and instructions templating (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use guard_prompts as prompts;

/// Call-input capture, redaction, and wire interop (enabled by `history`
/// feature).
#[cfg(feature = "history")]
pub use guard_history as history;
