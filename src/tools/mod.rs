pub mod browser;
pub mod factory;
pub mod memory_recall;
pub mod memory_store;
pub mod registry;
pub mod to_user;
pub mod traits;

pub use browser::BrowserTool;
pub use factory::{default_registry, default_tools};
pub use memory_recall::MemoryRecallTool;
pub use memory_store::MemoryStoreTool;
pub use registry::ToolRegistry;
pub use to_user::UserOutputTool;
pub use traits::{ParamSpec, Tool, ToolInputs, ToolOutcome, ToolSpec, input_text};
