use super::types::{ParsedPlan, Plan, PlanStep, PlanValue, StepRef};
use crate::error::PlanError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const FAILURE_KEY: &str = "FAILURE";
const REASON_KEY: &str = "REASON";
const STEP_COUNT_KEY: &str = "STEPS";
const TOOL_NAME_KEY: &str = "TOOL_NAME";
const OUTPUTS_KEY: &str = "OUTPUTS";

/// Key marking an input value as a reference to an earlier step's output.
///
/// References are tagged explicitly (`{"ref": "1B"}`) instead of sniffed out
/// of bare strings, so a literal that happens to look like `"2A"` stays a
/// literal.
const REF_KEY: &str = "ref";

/// Parse a raw plan document into a structured step sequence.
///
/// The document is already-structured data; stripping text fences or other
/// formatting the producer wrapped around it happens before this boundary.
/// Parsing is fail-fast: the first violation rejects the whole document.
pub fn parse_document(doc: &Value) -> Result<ParsedPlan, PlanError> {
    let fields = doc
        .as_object()
        .ok_or_else(|| PlanError::Malformed("plan document is not a JSON object".into()))?;

    if parse_failure_flag(fields.get(FAILURE_KEY))? {
        let reason = fields
            .get(REASON_KEY)
            .and_then(Value::as_str)
            .unwrap_or("planner gave no reason")
            .to_string();
        return Ok(ParsedPlan::Failure { reason });
    }

    let declared = parse_step_count(fields.get(STEP_COUNT_KEY))?;

    let entries: BTreeMap<usize, &Value> = fields
        .iter()
        .filter_map(|(key, value)| key.parse::<usize>().ok().map(|index| (index, value)))
        .collect();

    if entries.len() != declared {
        return Err(PlanError::StepCountMismatch {
            declared,
            found: entries.len(),
        });
    }

    let mut steps = Vec::with_capacity(declared);
    for index in 1..=declared {
        let entry = entries.get(&index).ok_or_else(|| {
            PlanError::Malformed(format!(
                "step entries must be numbered 1..{declared}: missing entry {index}"
            ))
        })?;
        steps.push(parse_step(index, entry)?);
    }

    Ok(ParsedPlan::Ready(Plan { steps }))
}

/// `FAILURE` is boolean-like at the boundary: a JSON bool, or the strings
/// `"true"`/`"false"` some producers emit. Absent means false.
fn parse_failure_flag(value: Option<&Value>) -> Result<bool, PlanError> {
    match value {
        None => Ok(false),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(text)) => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(PlanError::Malformed(format!(
                "{FAILURE_KEY} must be a boolean, got {text:?}"
            ))),
        },
        Some(other) => Err(PlanError::Malformed(format!(
            "{FAILURE_KEY} must be a boolean, got {other}"
        ))),
    }
}

fn parse_step_count(value: Option<&Value>) -> Result<usize, PlanError> {
    let value =
        value.ok_or_else(|| PlanError::Malformed(format!("missing {STEP_COUNT_KEY} field")))?;

    let count = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };

    count
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| {
            PlanError::Malformed(format!(
                "{STEP_COUNT_KEY} must be a non-negative integer, got {value}"
            ))
        })
}

fn parse_step(index: usize, entry: &Value) -> Result<PlanStep, PlanError> {
    let fields = entry
        .as_object()
        .ok_or_else(|| PlanError::Malformed(format!("step {index} is not a JSON object")))?;

    let tool_name = fields
        .get(TOOL_NAME_KEY)
        .and_then(Value::as_str)
        .ok_or_else(|| PlanError::Malformed(format!("step {index} is missing {TOOL_NAME_KEY}")))?
        .to_string();

    let outputs = match fields.get(OUTPUTS_KEY) {
        None => BTreeMap::new(),
        Some(value) => parse_outputs(index, value)?,
    };

    let mut inputs = BTreeMap::new();
    for (key, value) in fields {
        if key == TOOL_NAME_KEY || key == OUTPUTS_KEY {
            continue;
        }
        inputs.insert(key.clone(), parse_value(index, key, value)?);
    }

    Ok(PlanStep {
        tool_name,
        inputs,
        outputs,
    })
}

fn parse_outputs(index: usize, value: &Value) -> Result<BTreeMap<String, String>, PlanError> {
    let fields = value.as_object().ok_or_else(|| {
        PlanError::Malformed(format!("step {index}: {OUTPUTS_KEY} is not a JSON object"))
    })?;

    fields
        .iter()
        .map(|(letter, description)| {
            let description = description.as_str().ok_or_else(|| {
                PlanError::Malformed(format!(
                    "step {index}: {OUTPUTS_KEY} entry {letter} must be a string description"
                ))
            })?;
            Ok((letter.clone(), description.to_string()))
        })
        .collect()
}

fn parse_value(index: usize, input: &str, value: &Value) -> Result<PlanValue, PlanError> {
    let Some(fields) = value.as_object() else {
        return Ok(PlanValue::Literal(value.clone()));
    };

    if !fields.contains_key(REF_KEY) {
        return Ok(PlanValue::Literal(value.clone()));
    }

    parse_reference(fields)
        .map(PlanValue::Reference)
        .ok_or_else(|| PlanError::MalformedReference {
            step: index,
            input: input.to_string(),
            raw: value.to_string(),
        })
}

fn parse_reference(fields: &Map<String, Value>) -> Option<StepRef> {
    if fields.len() != 1 {
        return None;
    }
    fields.get(REF_KEY)?.as_str().and_then(StepRef::parse)
}
