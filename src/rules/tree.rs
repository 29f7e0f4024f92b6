use serde_json::{Map, Value};

use super::RuleSet;
use crate::constants::RULES_KEY;

/// A cleaned tree and the union of every payload found inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub cleaned: Value,
    pub rules: Map<String, Value>,
}

/// Strips directives from every string leaf of `value`.
///
/// Each mapping whose subtree produced at least one payload gains a
/// [`RULES_KEY`] entry holding the union of all payloads below it, so a
/// directive found deep in the tree is visible on every enclosing mapping.
/// On key collisions the later payload wins. The input must be acyclic,
/// which `serde_json::Value` guarantees.
pub fn transform(value: &Value, rules: &RuleSet) -> Transformed {
    match value {
        Value::String(text) => {
            let (cleaned, payloads) = rules.apply_text(text);
            Transformed { cleaned: Value::String(cleaned), rules: payloads }
        }
        Value::Array(items) => {
            let mut collected = Map::new();
            let cleaned = items
                .iter()
                .map(|item| {
                    let Transformed { cleaned, rules: found } = transform(item, rules);
                    collected.extend(found);
                    cleaned
                })
                .collect();
            Transformed { cleaned: Value::Array(cleaned), rules: collected }
        }
        Value::Object(entries) => {
            let mut collected = Map::new();
            let mut cleaned = Map::new();
            for (key, entry) in entries {
                let Transformed { cleaned: entry, rules: found } = transform(entry, rules);
                collected.extend(found);
                cleaned.insert(key.clone(), entry);
            }
            if !collected.is_empty() {
                cleaned.insert(RULES_KEY.to_string(), Value::Object(collected.clone()));
            }
            Transformed { cleaned: Value::Object(cleaned), rules: collected }
        }
        scalar => Transformed { cleaned: scalar.clone(), rules: Map::new() },
    }
}

impl RuleSet {
    /// See [`transform`].
    pub fn transform(&self, value: &Value) -> Transformed {
        transform(value, self)
    }
}
