use super::traits::{ParamSpec, Tool, ToolInputs, ToolOutcome, input_text};
use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;

/// Deliver text to the user. Conventionally the final step of a plan, though
/// nothing in the engine requires that.
pub struct UserOutputTool;

impl UserOutputTool {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for UserOutputTool {
    fn name(&self) -> &str {
        "to_user"
    }

    fn description(&self) -> &str {
        "Present text to the user as the result of the plan"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("X", "text to show the user")]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("A", "delivery status")]
    }

    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        let text = input_text(inputs, "X")?;
        println!("{text}");
        Ok(ToolOutcome::ok(BTreeMap::from([(
            "A".to_string(),
            json!("delivered"),
        )])))
    }
}
