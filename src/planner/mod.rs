mod executor;
mod parse;
mod symbols;
mod types;
mod validate;

pub use executor::{ExecutionReport, ExecutionState, PlanExecutor, StepTrace};
pub use parse::parse_document;
pub use symbols::{SymbolTable, resolve};
pub use types::{ParsedPlan, Plan, PlanStep, PlanValue, StepRef};
pub use validate::{ValidatedPlan, validate, validate_with};

use crate::error::Result;
use crate::tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;

/// Terminal outcome of running one raw plan document.
#[derive(Debug)]
pub enum RunOutcome {
    /// The producer reported that no viable plan exists; nothing executed.
    FailurePlan { reason: String },
    Executed(ExecutionReport),
}

/// Parse, validate, and execute a raw plan document against a registry.
pub async fn run_document(doc: &Value, registry: &Arc<ToolRegistry>) -> Result<RunOutcome> {
    match parse_document(doc)? {
        ParsedPlan::Failure { reason } => {
            tracing::info!(reason = %reason, "producer returned a failure plan");
            Ok(RunOutcome::FailurePlan { reason })
        }
        ParsedPlan::Ready(plan) => {
            let validated = validate_with(plan, registry)?;
            let report = PlanExecutor::new(Arc::clone(registry))
                .execute(validated)
                .await?;
            Ok(RunOutcome::Executed(report))
        }
    }
}
