//! Inline annotation rules.
//!
//! Free-text fields (typically column comments) may carry directives such as
//! `@enum(GENDER:male:Male,female:Female)`, `@dict(STATUS_TYPE)` or `@ignore`.
//! A [`RuleDefinition`] describes one directive declaratively; the
//! [`RuleRegistry`] merges the built-in definitions with the ones a group
//! declares, and the compiled [`RuleSet`] strips directives out of text or
//! whole JSON trees while collecting their structured payloads.

mod builtin;
mod extract;
mod registry;
mod tree;

use serde::{Deserialize, Serialize};

pub use builtin::{builtin_rules, DICT_RULE, ENUM_RULE, IGNORE_RULE};
pub use extract::{Annotation, OutputShape, Rule, ValueFormat};
pub use registry::{RuleRegistry, RuleSet};
pub use tree::{transform, Transformed};

/// Declarative description of one directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDefinition {
    /// Unique key within a registry; also the key of the payload in `_rules`.
    pub name: String,
    /// Regular expression matching one occurrence of the directive.
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub params: Vec<RuleParam>,
    #[serde(default)]
    pub parse: RuleParse,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<RuleExample>,
}

/// Maps a capture group to a semantic name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleParam {
    pub name: String,
    pub group: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present on list-valued params.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleParse {
    /// Item layout of list params, e.g. `{code}:{desc}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    /// Declared item separator. Splitting uses each param's own separator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Payload layout; string values name params.
    #[serde(default)]
    pub output: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExample {
    pub input: String,
    pub output: serde_json::Value,
}
