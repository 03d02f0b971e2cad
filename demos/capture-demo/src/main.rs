//! Example demonstrating call capture, redaction, and wire round trips.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use guardkit::history::CallInputs;
use guardkit::primitives::{CallableResult, LlmCallable};
use guardkit::prompts::{Instructions, Prompt};
use serde_json::{Map, Value};

/// Stand-in for a real provider client; replies with a canned completion.
struct CannedModel;

#[async_trait]
impl LlmCallable for CannedModel {
    async fn invoke(&self, _args: &[Value], kwargs: &Map<String, Value>) -> CallableResult<Value> {
        let model = kwargs
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        Ok(Value::from(format!("[{model}] apple\nbanana\ncherry")))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("=== Guardkit: Call Capture Example ===\n");

    let record = demonstrate_capture().await?;
    demonstrate_export_and_reload(&record)?;

    Ok(())
}

async fn demonstrate_capture() -> Result<CallInputs> {
    println!("--- Example 1: Render templates and capture a call ---\n");

    let prompt_template = Prompt::new("List {n} {category}");
    let instructions_template = Instructions::new("Answer with one {category} per line.");

    // Callers may pass more context than a template references; extras
    // are ignored rather than rejected.
    let mut variables = HashMap::new();
    variables.insert("n".to_owned(), "3".to_owned());
    variables.insert("category".to_owned(), "fruits".to_owned());
    variables.insert("audience".to_owned(), "unused here".to_owned());

    let prompt = prompt_template.render(&variables)?;
    let instructions = instructions_template.render(&variables)?;
    println!("Rendered prompt: {prompt}");
    println!("Rendered instructions: {instructions}\n");

    let record = CallInputs::builder()
        .prompt(prompt.source())
        .instructions(instructions.source())
        .llm_callable(Arc::new(CannedModel))
        .kwarg("model", Value::from("canned-1"))
        .kwarg("api_key", Value::from("sk-abcdefg1234"))
        .kwarg("temperature", Value::from(0.0))
        .build();

    tracing::info!(prompt = record.prompt(), "call inputs captured");

    let response = record
        .llm_callable()
        .expect("handle attached")
        .invoke(record.args(), record.kwargs())
        .await?;
    println!("Model response:\n{}\n", response.as_str().unwrap_or_default());

    Ok(record)
}

fn demonstrate_export_and_reload(record: &CallInputs) -> Result<()> {
    println!("--- Example 2: Export with redaction, then reload ---\n");

    let map = record.to_map()?;
    println!(
        "Exported record (api_key masked):\n{}\n",
        serde_json::to_string_pretty(&map)?
    );

    let restored = CallInputs::from_map(map)?;
    println!("Reloaded prompt: {:?}", restored.prompt());
    println!(
        "Reloaded record replayable: {} (the callable cannot cross the wire)",
        restored.is_replayable()
    );

    Ok(())
}
