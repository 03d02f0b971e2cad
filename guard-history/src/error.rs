//! Error definitions for call-input capture and interop.

use thiserror::Error;

/// Result alias used throughout the history crate.
pub type HistoryResult<T> = std::result::Result<T, HistoryError>;

/// Errors that can occur while moving call records across boundaries.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A wire payload failed to parse into the expected field set.
    #[error("malformed call inputs payload: {source}")]
    Serialization {
        /// Underlying codec error; names the offending field.
        #[from]
        source: serde_json::Error,
    },
}
