use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{Map, Value};

use super::{builtin_rules, Rule, RuleDefinition};

/// Name-keyed rule definitions; later insertions replace earlier ones in place.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    definitions: IndexMap<String, RuleDefinition>,
}

impl RuleRegistry {
    /// Inserts `builtins` then `customs`. A custom definition sharing a
    /// built-in's name replaces it and keeps the built-in's evaluation slot.
    pub fn merge<B, C>(builtins: B, customs: C) -> Self
    where
        B: IntoIterator<Item = RuleDefinition>,
        C: IntoIterator<Item = RuleDefinition>,
    {
        let mut definitions = IndexMap::new();
        for definition in builtins {
            definitions.insert(definition.name.clone(), definition);
        }
        for definition in customs {
            if definitions.contains_key(&definition.name) {
                debug!("Custom rule '{}' overrides the built-in definition", definition.name);
            }
            definitions.insert(definition.name.clone(), definition);
        }
        Self { definitions }
    }

    pub fn builtin() -> Self {
        Self::merge(builtin_rules(), Vec::new())
    }

    /// Built-in rules merged with a group's custom ones.
    pub fn with_customs<C>(customs: C) -> Self
    where
        C: IntoIterator<Item = RuleDefinition>,
    {
        Self::merge(builtin_rules(), customs)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RuleDefinition> {
        self.definitions.get(name)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &RuleDefinition> {
        self.definitions.values()
    }

    pub fn into_definitions(self) -> Vec<RuleDefinition> {
        self.definitions.into_values().collect()
    }

    /// Compiles every definition. Definitions whose pattern does not compile
    /// are skipped with a warning.
    pub fn compile(&self) -> RuleSet {
        let rules = self
            .definitions
            .values()
            .filter_map(|definition| match Rule::compile(definition.clone()) {
                Ok(rule) => Some(rule),
                Err(err) => {
                    warn!("Skipping rule '{}': invalid pattern: {err}", definition.name);
                    None
                }
            })
            .collect();
        RuleSet { rules }
    }
}

/// Compiled rules in evaluation order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn builtin() -> Self {
        RuleRegistry::builtin().compile()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs every rule over `text`, each one against the previous rule's
    /// output, and collects the payloads by rule name.
    pub fn apply_text(&self, text: &str) -> (String, Map<String, Value>) {
        let mut cleaned = text.to_string();
        let mut payloads = Map::new();
        for rule in &self.rules {
            let annotation = rule.apply(&cleaned);
            cleaned = annotation.cleaned;
            if let Some(payload) = annotation.payload {
                payloads.insert(rule.name().to_string(), payload);
            }
        }
        (cleaned, payloads)
    }
}
