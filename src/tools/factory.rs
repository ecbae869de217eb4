use super::browser::BrowserTool;
use super::memory_recall::MemoryRecallTool;
use super::memory_store::MemoryStoreTool;
use super::registry::ToolRegistry;
use super::to_user::UserOutputTool;
use super::traits::Tool;
use crate::config::Config;
use crate::error::RegistryError;

/// Create the default toolbox
pub fn default_tools(config: &Config) -> Vec<Box<dyn Tool>> {
    let memory_dir = config.memory_dir();
    vec![
        Box::new(BrowserTool::new(config.browser.max_results)),
        Box::new(MemoryStoreTool::new(memory_dir.clone())),
        Box::new(MemoryRecallTool::new(memory_dir)),
        Box::new(UserOutputTool::new()),
    ]
}

/// Build a registry populated with the default toolbox.
pub fn default_registry(config: &Config) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    for tool in default_tools(config) {
        registry.register(tool)?;
    }
    Ok(registry)
}
