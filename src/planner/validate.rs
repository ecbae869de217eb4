use super::types::{Plan, PlanStep, PlanValue, StepRef};
use crate::error::PlanError;
use crate::tools::{Tool, ToolRegistry};
use std::sync::Arc;

/// A plan that passed validation against a registry. Immutable; consumed
/// exactly once by the execution driver.
#[derive(Debug, Clone)]
pub struct ValidatedPlan {
    plan: Plan,
}

impl ValidatedPlan {
    pub fn steps(&self) -> &[PlanStep] {
        &self.plan.steps
    }

    pub fn len(&self) -> usize {
        self.plan.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.steps.is_empty()
    }
}

/// Check a parsed plan against the registry before any execution is
/// attempted. Fail-fast: the first violation rejects the plan wholesale.
pub fn validate(plan: Plan, registry: &ToolRegistry) -> Result<ValidatedPlan, PlanError> {
    for (idx, step) in plan.steps.iter().enumerate() {
        let index = idx + 1;

        let tool = registry
            .get(&step.tool_name)
            .ok_or_else(|| PlanError::UnknownTool {
                step: index,
                name: step.tool_name.clone(),
            })?;

        check_input_contract(index, step, tool.as_ref())?;
        check_references(index, step, &plan, registry)?;
        warn_on_undeclared_outputs(index, step, tool.as_ref());
    }

    Ok(ValidatedPlan { plan })
}

/// Supplied inputs must exactly cover the tool's declared input parameters.
fn check_input_contract(index: usize, step: &PlanStep, tool: &dyn Tool) -> Result<(), PlanError> {
    let declared = tool.input_params();

    for param in &declared {
        if !step.inputs.contains_key(&param.name) {
            return Err(PlanError::MissingInput {
                step: index,
                name: param.name.clone(),
            });
        }
    }

    for name in step.inputs.keys() {
        if !declared.iter().any(|param| &param.name == name) {
            return Err(PlanError::UnexpectedInput {
                step: index,
                name: name.clone(),
            });
        }
    }

    Ok(())
}

/// References must target a strictly earlier step and an output letter that
/// step's tool actually declares. Forward references, self references, and
/// references to nonexistent outputs are all dangling.
fn check_references(
    index: usize,
    step: &PlanStep,
    plan: &Plan,
    registry: &ToolRegistry,
) -> Result<(), PlanError> {
    for value in step.inputs.values() {
        let PlanValue::Reference(reference) = value else {
            continue;
        };
        check_reference(index, *reference, plan, registry)?;
    }
    Ok(())
}

fn check_reference(
    index: usize,
    reference: StepRef,
    plan: &Plan,
    registry: &ToolRegistry,
) -> Result<(), PlanError> {
    let dangling = |detail: String| PlanError::DanglingReference {
        step: index,
        reference: reference.to_string(),
        detail,
    };

    if reference.step == 0 {
        return Err(dangling("step indices are 1-based".into()));
    }
    if reference.step == index {
        return Err(dangling("step references itself".into()));
    }
    if reference.step > index {
        return Err(dangling(format!(
            "forward reference to step {}",
            reference.step
        )));
    }

    // Target is strictly earlier, so it was already checked against the
    // registry on a previous iteration.
    let target = &plan.steps[reference.step - 1];
    let tool = registry
        .get(&target.tool_name)
        .ok_or_else(|| PlanError::UnknownTool {
            step: reference.step,
            name: target.tool_name.clone(),
        })?;

    let letter = reference.letter.to_string();
    if !tool.output_params().iter().any(|param| param.name == letter) {
        return Err(dangling(format!(
            "tool {} declares no output {}",
            target.tool_name, reference.letter
        )));
    }

    Ok(())
}

/// The OUTPUTS mapping in the document describes what the step will produce;
/// the authoritative contract is the tool's declared outputs. Letters the
/// tool does not declare are ignored at execution time, so flag them here.
fn warn_on_undeclared_outputs(index: usize, step: &PlanStep, tool: &dyn Tool) {
    let declared = tool.output_params();
    for letter in step.outputs.keys() {
        if !declared.iter().any(|param| &param.name == letter) {
            tracing::warn!(
                step = index,
                tool = %step.tool_name,
                output = %letter,
                "plan declares an output the tool does not produce"
            );
        }
    }
}

/// Validate with an `Arc`'d registry, the shape the executor holds.
pub fn validate_with(
    plan: Plan,
    registry: &Arc<ToolRegistry>,
) -> Result<ValidatedPlan, PlanError> {
    validate(plan, registry.as_ref())
}
