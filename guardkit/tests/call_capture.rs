//! End-to-end exercise of the render -> capture -> export -> reload path.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use guardkit::history::CallInputs;
use guardkit::primitives::{CallableResult, LlmCallable};
use guardkit::prompts::Prompt;
use serde_json::{Map, Value};

struct StaticCallable {
    response: String,
}

#[async_trait]
impl LlmCallable for StaticCallable {
    async fn invoke(&self, _args: &[Value], _kwargs: &Map<String, Value>) -> CallableResult<Value> {
        Ok(Value::from(self.response.clone()))
    }
}

#[tokio::test]
async fn captures_exports_and_reloads_a_call() {
    let template = Prompt::new("List {n} fruits");
    let variables: HashMap<String, String> = [("n".to_owned(), "3".to_owned())].into();
    let prompt = template.render(&variables).unwrap();
    assert_eq!(prompt.source(), "List 3 fruits");

    let callable: Arc<dyn LlmCallable> = Arc::new(StaticCallable {
        response: "apple\nbanana\ncherry".to_owned(),
    });

    let record = CallInputs::builder()
        .prompt(prompt.source())
        .llm_callable(callable)
        .kwarg("auth_token", Value::from("abcd1234wxyz"))
        .kwarg("model", Value::from("x"))
        .build();

    // The live record can drive the actual invocation.
    let response = record
        .llm_callable()
        .expect("handle attached")
        .invoke(record.args(), record.kwargs())
        .await
        .unwrap();
    assert_eq!(response, Value::from("apple\nbanana\ncherry"));

    // Export: credential-shaped kwargs are masked, the rest untouched.
    let wire = record.to_wire();
    assert_eq!(wire.kwargs["auth_token"], Value::from("********wxyz"));
    assert_eq!(wire.kwargs["model"], Value::from("x"));

    // Reload through the plain-mapping form a persistence sink would use.
    let map = wire.into_map().unwrap();
    let restored = CallInputs::from_map(map).unwrap();

    assert_eq!(restored.prompt(), Some("List 3 fruits"));
    assert!(restored.llm_callable().is_none());
    assert!(!restored.is_replayable());
}

#[test]
fn redaction_insensitive_round_trip_is_identity() {
    let record = CallInputs::builder()
        .prompt("summarize this")
        .instructions("be brief")
        .args([Value::from(1), Value::from("two")])
        .kwarg("model", Value::from("x"))
        .kwarg("temperature", Value::from(0.5))
        .build();

    let restored = CallInputs::from_wire(record.to_wire());

    assert_eq!(restored.prompt(), record.prompt());
    assert_eq!(restored.instructions(), record.instructions());
    assert_eq!(restored.args(), record.args());
    assert_eq!(restored.kwargs(), record.kwargs());
    assert!(restored.llm_callable().is_none());
}
