//! Prompt and instructions templating for the guardkit runtime.
//!
//! Templates are immutable values: rendering returns a new value of the
//! same type and never mutates the original. Rendering tolerates callers
//! passing a superset of the variables a template actually references.

#![warn(missing_docs, clippy::pedantic)]

pub mod template;

pub use template::{Instructions, Prompt, TemplateError, TemplateResult, variable_names};
