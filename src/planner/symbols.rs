use super::types::PlanValue;
use crate::error::ResolveError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Execution-scoped store of already-produced step outputs, keyed by
/// `(step index, output letter)`. Populated incrementally as each step
/// completes; fresh for every execution, never shared across plans.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    entries: BTreeMap<(usize, char), Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, step: usize, letter: char, value: Value) {
        self.entries.insert((step, letter), value);
    }

    pub fn get(&self, step: usize, letter: char) -> Option<&Value> {
        self.entries.get(&(step, letter))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render entries keyed in wire form (`"1B"`), for reports and display.
    pub fn to_map(&self) -> BTreeMap<String, Value> {
        self.entries
            .iter()
            .map(|((step, letter), value)| (format!("{step}{letter}"), value.clone()))
            .collect()
    }
}

/// Resolve one bound value against the symbol table. Literals pass through
/// unchanged; references are looked up. Pure, no side effects.
///
/// A missing entry can only happen if validation was skipped or the table was
/// not populated in strict execution order, so it surfaces as an internal
/// invariant violation rather than a user-facing error.
pub fn resolve<'a>(
    value: &'a PlanValue,
    symbols: &'a SymbolTable,
) -> Result<&'a Value, ResolveError> {
    match value {
        PlanValue::Literal(literal) => Ok(literal),
        PlanValue::Reference(reference) => symbols
            .get(reference.step, reference.letter)
            .ok_or(ResolveError::Unresolved {
                step: reference.step,
                letter: reference.letter,
            }),
    }
}
