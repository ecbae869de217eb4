#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod producer;
pub mod tools;

pub use config::Config;
pub use error::{PlanlineError, Result};
pub use planner::{
    ExecutionReport, ExecutionState, ParsedPlan, Plan, PlanExecutor, RunOutcome, ValidatedPlan,
    parse_document, run_document, validate,
};
pub use producer::{OpenAiProducer, PlanProducer};
pub use tools::{ParamSpec, Tool, ToolInputs, ToolOutcome, ToolRegistry, ToolSpec};
