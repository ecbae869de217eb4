#![allow(dead_code)]

use async_trait::async_trait;
use planline::tools::{ParamSpec, Tool, ToolInputs, ToolOutcome, ToolRegistry};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Stub search tool: `browser(X: search term) -> (A: status, B: results)`.
pub struct SearchStub {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Tool for SearchStub {
    fn name(&self) -> &str {
        "browser"
    }

    fn description(&self) -> &str {
        "stub web search"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("X", "search term")]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("A", "status"),
            ParamSpec::new("B", "results"),
        ]
    }

    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let term = inputs["X"].as_str().unwrap_or_default();
        Ok(ToolOutcome::ok(BTreeMap::from([
            ("A".to_string(), json!("ok")),
            ("B".to_string(), json!(format!("results for {term}"))),
        ])))
    }
}

/// Stub delivery tool: `to_user(X: text) -> (A: status)`. Records the last
/// delivered text for assertions.
pub struct DeliverStub {
    pub calls: Arc<AtomicUsize>,
    pub delivered: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl Tool for DeliverStub {
    fn name(&self) -> &str {
        "to_user"
    }

    fn description(&self) -> &str {
        "stub user delivery"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("X", "text")]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("A", "status")]
    }

    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = match &inputs["X"] {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        *self.delivered.lock().unwrap() = Some(text);
        Ok(ToolOutcome::ok(BTreeMap::from([(
            "A".to_string(),
            json!("delivered"),
        )])))
    }
}

/// Stub tool that always fails: `flaky(X: anything) -> (A: never)`.
pub struct FlakyStub {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Tool for FlakyStub {
    fn name(&self) -> &str {
        "flaky"
    }

    fn description(&self) -> &str {
        "stub tool that always fails"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("X", "anything")]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("A", "never produced")]
    }

    async fn invoke(&self, _inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ToolOutcome::fail("upstream service exploded"))
    }
}

/// Handles onto the stub toolbox for assertions.
pub struct Toolbox {
    pub registry: Arc<ToolRegistry>,
    pub search_calls: Arc<AtomicUsize>,
    pub deliver_calls: Arc<AtomicUsize>,
    pub flaky_calls: Arc<AtomicUsize>,
    pub delivered: Arc<Mutex<Option<String>>>,
}

pub fn stub_toolbox() -> Toolbox {
    let search_calls = Arc::new(AtomicUsize::new(0));
    let deliver_calls = Arc::new(AtomicUsize::new(0));
    let flaky_calls = Arc::new(AtomicUsize::new(0));
    let delivered = Arc::new(Mutex::new(None));

    let mut registry = ToolRegistry::new();
    registry
        .register(Box::new(SearchStub {
            calls: Arc::clone(&search_calls),
        }))
        .unwrap();
    registry
        .register(Box::new(DeliverStub {
            calls: Arc::clone(&deliver_calls),
            delivered: Arc::clone(&delivered),
        }))
        .unwrap();
    registry
        .register(Box::new(FlakyStub {
            calls: Arc::clone(&flaky_calls),
        }))
        .unwrap();

    Toolbox {
        registry: Arc::new(registry),
        search_calls,
        deliver_calls,
        flaky_calls,
        delivered,
    }
}

impl Toolbox {
    pub fn total_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
            + self.deliver_calls.load(Ordering::SeqCst)
            + self.flaky_calls.load(Ordering::SeqCst)
    }
}
