use super::symbols::{SymbolTable, resolve};
use super::types::PlanStep;
use super::validate::ValidatedPlan;
use crate::tools::{ToolInputs, ToolOutcome, ToolRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ── Public types ─────────────────────────────────────────────────────────────

/// Where an execution currently stands, and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExecutionState {
    NotStarted,
    Running { step: usize },
    Completed,
    Failed { step: usize, cause: String },
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Running { step } => write!(f, "running step {step}"),
            Self::Completed => write!(f, "completed"),
            Self::Failed { step, cause } => write!(f, "failed at step {step}: {cause}"),
        }
    }
}

/// Record of a single executed step: resolved inputs in, produced outputs out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrace {
    pub step: usize,
    pub tool_name: String,
    pub inputs: BTreeMap<String, Value>,
    /// Empty when the step failed.
    pub outputs: BTreeMap<String, Value>,
}

/// Terminal report of one plan execution: final state, the ordered trace of
/// every step that ran, and the full symbol table for inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub run_id: String,
    pub state: ExecutionState,
    pub trace: Vec<StepTrace>,
    /// Symbol table entries in wire form (`"1B"` → value).
    pub symbols: BTreeMap<String, Value>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExecutionReport {
    pub fn completed(&self) -> bool {
        self.state == ExecutionState::Completed
    }
}

// ── Internal types ───────────────────────────────────────────────────────────

/// Outcome of driving one step.
enum StepRun {
    /// Outputs committed; advance to the next step.
    Advance {
        inputs: BTreeMap<String, Value>,
        outputs: BTreeMap<String, Value>,
    },
    /// The tool reported failure; halt, later steps may depend on its outputs.
    Halt {
        inputs: BTreeMap<String, Value>,
        cause: String,
    },
}

// ── Implementation ───────────────────────────────────────────────────────────

/// Sequential driver over a validated plan.
///
/// Steps run strictly in declaration order; step *i+1* never begins before
/// step *i*'s outputs are committed to the symbol table. Tool invocations are
/// opaque, time-unbounded calls — timeout and cancellation belong to the tool
/// or an external supervisor, not to the driver.
pub struct PlanExecutor {
    registry: Arc<ToolRegistry>,
}

impl PlanExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Run the plan to a terminal state. Consumes the plan: every execution
    /// starts from a fresh symbol table, so re-running means re-validating.
    pub async fn execute(&self, plan: ValidatedPlan) -> crate::error::Result<ExecutionReport> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let mut symbols = SymbolTable::new();
        let mut trace = Vec::with_capacity(plan.len());
        let mut state = ExecutionState::NotStarted;

        for (idx, step) in plan.steps().iter().enumerate() {
            let index = idx + 1;
            state = ExecutionState::Running { step: index };
            tracing::info!(run_id = %run_id, step = index, tool = %step.tool_name, "executing step");

            match self.run_step(index, step, &mut symbols).await? {
                StepRun::Advance { inputs, outputs } => {
                    trace.push(StepTrace {
                        step: index,
                        tool_name: step.tool_name.clone(),
                        inputs,
                        outputs,
                    });
                }
                StepRun::Halt { inputs, cause } => {
                    tracing::warn!(run_id = %run_id, step = index, tool = %step.tool_name, cause = %cause, "step failed, halting plan");
                    trace.push(StepTrace {
                        step: index,
                        tool_name: step.tool_name.clone(),
                        inputs,
                        outputs: BTreeMap::new(),
                    });
                    state = ExecutionState::Failed { step: index, cause };
                    break;
                }
            }
        }

        if !matches!(state, ExecutionState::Failed { .. }) {
            state = ExecutionState::Completed;
        }

        Ok(ExecutionReport {
            run_id,
            state,
            trace,
            symbols: symbols.to_map(),
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Resolve one step's inputs, invoke its tool, and commit outputs.
    ///
    /// A resolution miss propagates as an engine error (the ordering
    /// invariant was violated); a tool failure is a normal halt.
    async fn run_step(
        &self,
        index: usize,
        step: &PlanStep,
        symbols: &mut SymbolTable,
    ) -> crate::error::Result<StepRun> {
        let mut inputs = ToolInputs::new();
        for (name, value) in &step.inputs {
            inputs.insert(name.clone(), resolve(value, symbols)?.clone());
        }

        let tool = self.registry.lookup(&step.tool_name)?;

        let outcome = match tool.invoke(&inputs).await {
            Ok(outcome) => outcome,
            Err(e) => ToolOutcome::fail(e.to_string()),
        };

        if !outcome.success {
            let cause = outcome
                .error
                .unwrap_or_else(|| "tool reported failure without a cause".to_string());
            return Ok(StepRun::Halt { inputs, cause });
        }

        // Verify the whole declared output set before committing anything.
        let mut produced = BTreeMap::new();
        for param in tool.output_params() {
            let Some(value) = outcome.outputs.get(&param.name) else {
                return Ok(StepRun::Halt {
                    inputs,
                    cause: format!(
                        "tool contract violation: declared output {} was not produced",
                        param.name
                    ),
                });
            };
            produced.insert(param.name.clone(), value.clone());
        }

        for (name, value) in &produced {
            // Registration guarantees output names are single capital letters.
            let letter = name.chars().next().unwrap_or('A');
            symbols.insert(index, letter, value.clone());
        }

        for name in outcome.outputs.keys() {
            if !produced.contains_key(name) {
                tracing::warn!(step = index, tool = %step.tool_name, output = %name, "ignoring undeclared output");
            }
        }

        Ok(StepRun::Advance {
            inputs,
            outputs: produced,
        })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
