use super::traits::{ParamSpec, Tool, ToolInputs, ToolOutcome, input_text};
use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Persist a named note to the workspace memory directory.
pub struct MemoryStoreTool {
    memory_dir: PathBuf,
}

impl MemoryStoreTool {
    pub fn new(memory_dir: impl Into<PathBuf>) -> Self {
        Self {
            memory_dir: memory_dir.into(),
        }
    }
}

/// Restrict note names to a single safe path component.
pub(super) fn note_path(memory_dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        anyhow::bail!("note name cannot be empty");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!("note name {trimmed:?} may only contain letters, digits, '-' and '_'");
    }
    Ok(memory_dir.join(format!("{trimmed}.md")))
}

#[async_trait]
impl Tool for MemoryStoreTool {
    fn name(&self) -> &str {
        "memory_store"
    }

    fn description(&self) -> &str {
        "Store information under a note name for later retrieval"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("X", "note name"),
            ParamSpec::new("Y", "content to store"),
        ]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("A", "status")]
    }

    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        let name = input_text(inputs, "X")?;
        let content = input_text(inputs, "Y")?;

        let path = match note_path(&self.memory_dir, &name) {
            Ok(path) => path,
            Err(e) => return Ok(ToolOutcome::fail(e.to_string())),
        };

        tokio::fs::create_dir_all(&self.memory_dir).await?;
        tokio::fs::write(&path, content).await?;

        Ok(ToolOutcome::ok(BTreeMap::from([(
            "A".to_string(),
            json!(format!("stored note {}", name.trim())),
        )])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stores_note_to_disk() {
        let tmp = TempDir::new().unwrap();
        let tool = MemoryStoreTool::new(tmp.path());
        let inputs = ToolInputs::from([
            ("X".to_string(), json!("findings")),
            ("Y".to_string(), json!("cats are liquid")),
        ]);

        let outcome = tool.invoke(&inputs).await.unwrap();
        assert!(outcome.success);

        let written = std::fs::read_to_string(tmp.path().join("findings.md")).unwrap();
        assert_eq!(written, "cats are liquid");
    }

    #[tokio::test]
    async fn rejects_path_traversal_names() {
        let tmp = TempDir::new().unwrap();
        let tool = MemoryStoreTool::new(tmp.path());
        let inputs = ToolInputs::from([
            ("X".to_string(), json!("../escape")),
            ("Y".to_string(), json!("nope")),
        ]);

        let outcome = tool.invoke(&inputs).await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("note name"));
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let tmp = TempDir::new().unwrap();
        let tool = MemoryStoreTool::new(tmp.path());
        let inputs = ToolInputs::from([
            ("X".to_string(), json!("  ")),
            ("Y".to_string(), json!("data")),
        ]);

        let outcome = tool.invoke(&inputs).await.unwrap();
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn missing_content_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let tool = MemoryStoreTool::new(tmp.path());
        let inputs = ToolInputs::from([("X".to_string(), json!("name-only"))]);
        assert!(tool.invoke(&inputs).await.is_err());
    }
}
