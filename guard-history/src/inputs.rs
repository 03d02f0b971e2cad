//! Captured inputs for a single model invocation attempt.

use std::fmt;
use std::sync::Arc;

use guard_primitives::LlmCallable;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::HistoryResult;
use crate::redact::redact_kwargs;
use crate::wire::WireCallInputs;

/// Fields shared by every invocation-inputs record kind.
///
/// Kept as an embedded value rather than a parent type: a record *contains*
/// these base fields and adds its own. Fields the shared schema defines but
/// this crate does not interpret ride in `extra` and are carried verbatim
/// through every conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationInputs {
    /// Rendered prompt text actually sent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    /// Rendered secondary/system-style text actually sent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Uninterpreted base-schema fields, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Captured inputs describing one attempt to invoke an underlying model.
///
/// One record exists per attempt; a retry produces its own record. The
/// record is populated before the call is dispatched and treated as
/// immutable once the call completes, so observers may read it without
/// synchronization. Redaction never touches the live record: it applies
/// only when exporting to [`WireCallInputs`], which keeps real credentials
/// available for a legitimate retry.
///
/// Positional and keyword arguments reproduce exactly what the caller
/// supplied beyond the prompt, instructions, and the callable itself. No
/// shape validation is performed; values pass through opaquely.
#[derive(Clone, Default)]
pub struct CallInputs {
    inputs: InvocationInputs,
    llm_callable: Option<Arc<dyn LlmCallable>>,
    args: Vec<Value>,
    kwargs: Map<String, Value>,
}

impl CallInputs {
    /// Starts building a record incrementally.
    #[must_use]
    pub fn builder() -> CallInputsBuilder {
        CallInputsBuilder::default()
    }

    /// Returns the rendered prompt text, if one was sent.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.inputs.prompt.as_deref()
    }

    /// Returns the rendered instructions text, if one was sent.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.inputs.instructions.as_deref()
    }

    /// Returns the embedded base fields.
    #[must_use]
    pub fn inputs(&self) -> &InvocationInputs {
        &self.inputs
    }

    /// Returns the positional passthrough arguments, in caller order.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Returns the keyword passthrough arguments, unredacted.
    #[must_use]
    pub fn kwargs(&self) -> &Map<String, Value> {
        &self.kwargs
    }

    /// Returns the user-supplied invocation handle, if one is attached.
    #[must_use]
    pub fn llm_callable(&self) -> Option<&Arc<dyn LlmCallable>> {
        self.llm_callable.as_ref()
    }

    /// Reports whether this record can be replayed directly.
    ///
    /// Always `false` for a record reconstructed from the wire: the handle
    /// cannot cross that boundary, and callers must install a new one
    /// before replaying.
    #[must_use]
    pub fn is_replayable(&self) -> bool {
        self.llm_callable.is_some()
    }

    /// Exports the record into its stable wire representation.
    ///
    /// Keyword arguments pass through [`redact_kwargs`]; positional
    /// arguments are copied as-is (credential-shaped names only occur as
    /// keywords in practice). The callable handle is never included.
    #[must_use]
    pub fn to_wire(&self) -> WireCallInputs {
        WireCallInputs {
            prompt: self.inputs.prompt.clone(),
            instructions: self.inputs.instructions.clone(),
            args: self.args.clone(),
            kwargs: redact_kwargs(&self.kwargs),
            extra: self.inputs.extra.clone(),
        }
    }

    /// Reconstructs a record from its wire representation.
    ///
    /// The callable handle cannot be recovered, so the result always
    /// reports [`CallInputs::is_replayable`] as `false`. Values redacted
    /// before serialization stay redacted; no un-redaction is attempted.
    #[must_use]
    pub fn from_wire(wire: WireCallInputs) -> Self {
        Self {
            inputs: InvocationInputs {
                prompt: wire.prompt,
                instructions: wire.instructions,
                extra: wire.extra,
            },
            llm_callable: None,
            args: wire.args,
            kwargs: wire.kwargs,
        }
    }

    /// Converts the record to a plain JSON mapping, composing through the
    /// wire shape (and therefore through redaction).
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialization`](crate::HistoryError) when a
    /// contained value cannot be encoded.
    pub fn to_map(&self) -> HistoryResult<Map<String, Value>> {
        self.to_wire().into_map()
    }

    /// Reconstructs a record from a plain JSON mapping, composing through
    /// the wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialization`](crate::HistoryError) when
    /// the mapping does not match the wire field set.
    pub fn from_map(map: Map<String, Value>) -> HistoryResult<Self> {
        Ok(Self::from_wire(WireCallInputs::from_map(map)?))
    }
}

impl fmt::Debug for CallInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallInputs")
            .field("prompt", &self.inputs.prompt)
            .field("instructions", &self.inputs.instructions)
            .field("args", &self.args)
            .field("kwargs", &self.kwargs)
            .field("llm_callable", &self.llm_callable.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder used by orchestration code to assemble [`CallInputs`].
///
/// Accepts fields in any order and performs no validation; `build` cannot
/// fail.
#[derive(Default)]
pub struct CallInputsBuilder {
    inputs: InvocationInputs,
    llm_callable: Option<Arc<dyn LlmCallable>>,
    args: Vec<Value>,
    kwargs: Map<String, Value>,
}

impl CallInputsBuilder {
    /// Sets the rendered prompt text.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.inputs.prompt = Some(prompt.into());
        self
    }

    /// Sets the rendered instructions text.
    #[must_use]
    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.inputs.instructions = Some(instructions.into());
        self
    }

    /// Attaches the user-supplied invocation handle.
    #[must_use]
    pub fn llm_callable(mut self, callable: Arc<dyn LlmCallable>) -> Self {
        self.llm_callable = Some(callable);
        self
    }

    /// Appends one positional argument.
    #[must_use]
    pub fn arg(mut self, value: Value) -> Self {
        self.args.push(value);
        self
    }

    /// Appends positional arguments in iteration order.
    #[must_use]
    pub fn args<I>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        self.args.extend(values);
        self
    }

    /// Sets one keyword argument, replacing any previous value for the key.
    #[must_use]
    pub fn kwarg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.kwargs.insert(name.into(), value);
        self
    }

    /// Merges a keyword-argument map, overwriting duplicate keys.
    #[must_use]
    pub fn kwargs(mut self, map: Map<String, Value>) -> Self {
        self.kwargs.extend(map);
        self
    }

    /// Sets an uninterpreted base-schema field, carried through verbatim.
    #[must_use]
    pub fn extra(mut self, name: impl Into<String>, value: Value) -> Self {
        self.inputs.extra.insert(name.into(), value);
        self
    }

    /// Finalises the record.
    #[must_use]
    pub fn build(self) -> CallInputs {
        CallInputs {
            inputs: self.inputs,
            llm_callable: self.llm_callable,
            args: self.args,
            kwargs: self.kwargs,
        }
    }
}
