//! Capability handle for user-supplied model invocation functions.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::CallableResult;

/// A user-supplied function that performs one model invocation.
///
/// The handle exists only in-process. It is deliberately kept out of every
/// serializable structure, so a call record reconstructed from the wire
/// carries no handle; orchestration code must check for its presence before
/// attempting a replay. A record may also be built without a handle when
/// the caller routes the invocation through a default transport instead.
#[async_trait]
pub trait LlmCallable: Send + Sync {
    /// Invokes the underlying model with the captured arguments.
    ///
    /// `args` and `kwargs` are passed through exactly as recorded; this
    /// trait imposes no interpretation on them.
    ///
    /// # Errors
    ///
    /// Returns [`CallableError`](crate::CallableError) when the invocation
    /// itself fails.
    async fn invoke(&self, args: &[Value], kwargs: &Map<String, Value>) -> CallableResult<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CallableError;

    struct EchoCallable;

    #[async_trait]
    impl LlmCallable for EchoCallable {
        async fn invoke(
            &self,
            args: &[Value],
            _kwargs: &Map<String, Value>,
        ) -> CallableResult<Value> {
            args.first()
                .cloned()
                .ok_or_else(|| CallableError::invocation("no arguments supplied"))
        }
    }

    #[tokio::test]
    async fn invokes_through_trait_object() {
        let callable: std::sync::Arc<dyn LlmCallable> = std::sync::Arc::new(EchoCallable);
        let args = vec![Value::from("ping")];
        let result = callable.invoke(&args, &Map::new()).await.unwrap();
        assert_eq!(result, Value::from("ping"));
    }

    #[tokio::test]
    async fn surfaces_invocation_failures() {
        let callable = EchoCallable;
        let err = callable
            .invoke(&[], &Map::new())
            .await
            .expect_err("empty args should fail");
        assert!(matches!(err, CallableError::Invocation { .. }));
    }
}
