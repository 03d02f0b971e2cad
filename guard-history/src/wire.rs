//! Stable wire representation for captured call inputs.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HistoryResult;

/// Wire-level shape of one captured model invocation's inputs.
///
/// This is the field-for-field schema shared across process and storage
/// boundaries. The in-process callable handle has no representation here,
/// and `kwargs` holds the redacted form produced at export time. Base
/// schema fields this crate does not interpret ride in `extra` and survive
/// every conversion verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireCallInputs {
    /// Rendered prompt text, if any was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Rendered secondary/system-style text, if any was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Positional passthrough arguments, order preserved, never redacted.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Keyword passthrough arguments, redacted before export.
    #[serde(default)]
    pub kwargs: Map<String, Value>,
    /// Base-schema fields not interpreted by this crate.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WireCallInputs {
    /// Serializes the wire shape into a plain JSON mapping, for generic
    /// persistence and logging sinks.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialization`](crate::HistoryError) when a
    /// contained value cannot be encoded.
    pub fn into_map(self) -> HistoryResult<Map<String, Value>> {
        let value = serde_json::to_value(self)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Parses a wire shape out of a plain JSON mapping.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialization`](crate::HistoryError) when
    /// the mapping does not match the expected field set.
    pub fn from_map(map: Map<String, Value>) -> HistoryResult<Self> {
        Ok(serde_json::from_value(Value::Object(map))?)
    }
}
