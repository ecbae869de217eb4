use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A reference to an earlier step's output: `2B` names step 2's output `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRef {
    /// 1-based index of the referenced step
    pub step: usize,
    /// Output letter declared by the referenced step's tool
    pub letter: char,
}

impl StepRef {
    /// Parse the `<step-index><output-letter>` encoding, e.g. `"1B"`.
    pub fn parse(raw: &str) -> Option<Self> {
        let letter = raw.chars().last()?;
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let digits = &raw[..raw.len() - 1];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let step = digits.parse().ok()?;
        Some(Self { step, letter })
    }
}

impl fmt::Display for StepRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.step, self.letter)
    }
}

/// One bound input of a step: a literal passed as-is, or a reference to an
/// earlier step's output.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanValue {
    Literal(Value),
    Reference(StepRef),
}

/// One unit of work in a plan: a tool invocation with bound inputs and
/// declared outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    pub tool_name: String,
    /// Input parameter name → bound value
    pub inputs: BTreeMap<String, PlanValue>,
    /// Output letter → description of what the step will produce
    pub outputs: BTreeMap<String, String>,
}

/// An ordered sequence of steps. Steps are never reordered: execution order
/// is declaration order, which doubles as dependency order because references
/// only target strictly earlier steps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

/// Outcome of parsing a raw plan document: either a real plan, or the
/// producer's report that no viable plan exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPlan {
    /// The producer could not construct a plan; the reason is surfaced
    /// verbatim and nothing executes.
    Failure { reason: String },
    Ready(Plan),
}
