use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One declared parameter of a tool: a short name (single capital letters by
/// convention, and required for outputs so steps can reference them) plus a
/// human-readable description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Resolved input mapping handed to a tool invocation: parameter name → value.
pub type ToolInputs = BTreeMap<String, Value>;

/// Result of a tool invocation: either a success mapping covering the tool's
/// declared outputs, or a failure carrying a cause. Tool failures are part of
/// the normal outcome contract, not engine faults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(default)]
    pub outputs: BTreeMap<String, Value>,
    pub error: Option<String>,
}

impl ToolOutcome {
    pub fn ok(outputs: BTreeMap<String, Value>) -> Self {
        Self {
            success: true,
            outputs,
            error: None,
        }
    }

    pub fn fail(cause: impl Into<String>) -> Self {
        Self {
            success: false,
            outputs: BTreeMap::new(),
            error: Some(cause.into()),
        }
    }
}

/// Description of a tool for the plan producer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<ParamSpec>,
}

/// Core tool trait — implement for any capability
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (used in plan steps)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Declared input parameters, in order
    fn input_params(&self) -> Vec<ParamSpec>;

    /// Declared output parameters, in order. Names must be single ASCII
    /// capital letters so later steps can reference them.
    fn output_params(&self) -> Vec<ParamSpec>;

    /// Invoke the tool with a fully resolved input mapping
    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome>;

    /// Get the full spec for the producer catalog
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            inputs: self.input_params(),
            outputs: self.output_params(),
        }
    }
}

/// Pull a string input out of the resolved mapping. Non-string values are
/// rendered as compact JSON so tools taking free text accept upstream
/// structured outputs unchanged.
pub fn input_text(inputs: &ToolInputs, name: &str) -> anyhow::Result<String> {
    let value = inputs
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("Missing '{name}' parameter"))?;
    Ok(match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}
