use super::memory_store::note_path;
use super::traits::{ParamSpec, Tool, ToolInputs, ToolOutcome, input_text};
use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Retrieve a previously stored note from the workspace memory directory.
pub struct MemoryRecallTool {
    memory_dir: PathBuf,
}

impl MemoryRecallTool {
    pub fn new(memory_dir: impl Into<PathBuf>) -> Self {
        Self {
            memory_dir: memory_dir.into(),
        }
    }
}

#[async_trait]
impl Tool for MemoryRecallTool {
    fn name(&self) -> &str {
        "memory_recall"
    }

    fn description(&self) -> &str {
        "Retrieve information previously stored under a note name"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("X", "note name")]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("A", "status"),
            ParamSpec::new("B", "stored content"),
        ]
    }

    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        let name = input_text(inputs, "X")?;

        let path = match note_path(&self.memory_dir, &name) {
            Ok(path) => path,
            Err(e) => return Ok(ToolOutcome::fail(e.to_string())),
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(ToolOutcome::ok(BTreeMap::from([
                (
                    "A".to_string(),
                    json!(format!("recalled note {}", name.trim())),
                ),
                ("B".to_string(), json!(content)),
            ]))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ToolOutcome::fail(format!(
                "no stored note named {}",
                name.trim()
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
