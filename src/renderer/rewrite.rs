//! Textual rewrite of rule-metadata paths in MiniJinja templates.
//!
//! Templates written against annotated data reach directive payloads through
//! the reserved `_rules` key (`field._rules.enum.name`). Module generation
//! renders flattened field objects instead, where those payloads live on the
//! field itself (`field.enumDef.name`), and MiniJinja refuses attribute access
//! through the missing `_rules` value. Before rendering, the fixed whitelist
//! below maps each known expression to its flattened equivalent.
//!
//! Only the listed shapes are rewritten. Other spellings such as
//! `field._rules['enum']`, a loop variable other than `field`, or rule names
//! missing from [`FLATTENED_PATHS`] are left untouched and fail at render time.

use std::sync::LazyLock;

use regex::Regex;

/// Rule name under `_rules` -> attribute on a flattened field.
pub const FLATTENED_PATHS: &[(&str, &str)] = &[
    ("enum", "enumDef"),
    ("dict", "dictRef"),
    ("ignore", "ignore"),
    ("isPrimaryKey", "isPrimaryKey"),
    ("isQueryField", "isQueryField"),
];

/// Expression shapes, `{rule}` and `{attr}` filled from [`FLATTENED_PATHS`].
/// Order matters: the guarded shape must be consumed before plain reads.
const FIELD_PATH_FORMS: &[(&str, &str)] = &[
    // null-safe guarded read
    (
        r"\bfield\._rules\s+is\s+defined\s+and\s+field\._rules\.{rule}\b",
        "field.{attr}",
    ),
    // presence check
    (
        r"\{%(-?)\s*if\s+field\._rules\.{rule}\s*(-?)%\}",
        "{%${1} if field.{attr} ${2}%}",
    ),
    // negated presence check
    (
        r"\{%(-?)\s*if\s+not\s+field\._rules\.{rule}\s*(-?)%\}",
        "{%${1} if not field.{attr} ${2}%}",
    ),
    // property read, with or without a trailing `.name` and filters
    (r"\bfield\._rules\.{rule}\b", "field.{attr}"),
];

/// Per-value constant names in enumeration templates.
const ENUM_VALUE_FORMS: &[(&str, &str)] = &[
    (r"\bitem\.code\s*\|\s*upper\b", "item.enumCodeName"),
    (r"\bitem\.code\.upper\(\)", "item.enumCodeName"),
];

static FIELD_PATH_REWRITES: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    FIELD_PATH_FORMS
        .iter()
        .flat_map(|(pattern, replacement)| {
            FLATTENED_PATHS.iter().map(move |(rule, attr)| {
                compile(
                    &pattern.replace("{rule}", rule),
                    replacement.replace("{attr}", attr),
                )
            })
        })
        .collect()
});

static ENUM_VALUE_REWRITES: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    ENUM_VALUE_FORMS
        .iter()
        .map(|(pattern, replacement)| compile(pattern, replacement.to_string()))
        .collect()
});

fn compile(pattern: &str, replacement: String) -> (Regex, String) {
    let regex = Regex::new(pattern).expect("rewrite whitelist patterns are valid");
    (regex, replacement)
}

fn apply(rewrites: &[(Regex, String)], template: &str) -> String {
    rewrites.iter().fold(template.to_string(), |text, (regex, replacement)| {
        regex.replace_all(&text, replacement.as_str()).into_owned()
    })
}

/// Rewrites whitelisted `field._rules.*` expressions to flattened field paths.
///
/// # Examples
/// ```
/// use codesmith::renderer::rewrite::rewrite_field_paths;
///
/// assert_eq!(
///     rewrite_field_paths("{% if field._rules.enum %}{{ field._rules.enum.name }}{% endif %}"),
///     "{% if field.enumDef %}{{ field.enumDef.name }}{% endif %}",
/// );
/// ```
pub fn rewrite_field_paths(template: &str) -> String {
    apply(&FIELD_PATH_REWRITES, template)
}

/// Rewrites upper-cased value codes to the generated `enumCodeName`.
pub fn rewrite_enum_values(template: &str) -> String {
    apply(&ENUM_VALUE_REWRITES, template)
}
