use super::traits::{ParamSpec, Tool, ToolSpec};
use crate::error::RegistryError;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

/// Central catalog of tool instances, keyed by name.
///
/// Tools are registered once at startup and are immutable for the lifetime of
/// a run. Catalog ordering is registration order, which keeps
/// [`describe_all`](ToolRegistry::describe_all) deterministic for the plan
/// producer.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Fails if a tool with the same name already exists or
    /// if an output parameter is not named by a single capital letter.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }

        for param in tool.output_params() {
            if !is_output_letter(&param.name) {
                return Err(RegistryError::InvalidSpec {
                    name: name.clone(),
                    detail: format!(
                        "output parameter {:?} must be a single capital letter",
                        param.name
                    ),
                });
            }
        }

        tracing::debug!(tool = %name, "registered tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(Arc::from(tool));
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<dyn Tool>, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::Unknown {
            name: name.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Return specs for all registered tools, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec()).collect()
    }

    /// Render the human-readable catalog handed to the plan producer.
    ///
    /// Ordering is registration order and does not change across repeated
    /// calls with no intervening registration.
    pub fn describe_all(&self) -> String {
        let mut catalog = String::from("AVAILABLE TOOLS:\n");
        for tool in &self.tools {
            let spec = tool.spec();
            let _ = write!(catalog, "{} - {}", spec.name, spec.description);
            let _ = write!(catalog, " (inputs: {};", render_params(&spec.inputs));
            let _ = writeln!(catalog, " outputs: {})", render_params(&spec.outputs));
        }
        catalog
    }
}

fn render_params(params: &[ParamSpec]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.description))
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_output_letter(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}
