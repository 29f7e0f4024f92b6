use serde_json::json;

use super::{RuleDefinition, RuleExample, RuleParam, RuleParse};

pub const ENUM_RULE: &str = "enum";
pub const DICT_RULE: &str = "dict";
pub const IGNORE_RULE: &str = "ignore";

/// Built-in directives in evaluation order: enumeration, dictionary, ignore.
pub fn builtin_rules() -> Vec<RuleDefinition> {
    vec![enum_rule(), dict_rule(), ignore_rule()]
}

fn param(name: &str, group: usize, description: &str) -> RuleParam {
    RuleParam {
        name: name.to_string(),
        group,
        description: Some(description.to_string()),
        separator: None,
    }
}

fn output(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// `@enum(NAME:code1:desc1,code2:desc2,...)`
fn enum_rule() -> RuleDefinition {
    RuleDefinition {
        name: ENUM_RULE.to_string(),
        pattern: r"@enum\(([A-Za-z0-9_]+):([^)]+)\)".to_string(),
        description: Some("Enumeration declared inside a field comment".to_string()),
        params: vec![
            param("enumName", 1, "Enumeration name"),
            RuleParam {
                separator: Some(",".to_string()),
                ..param("values", 2, "Enumeration values")
            },
        ],
        parse: RuleParse {
            value_format: Some("{code}:{desc}".to_string()),
            separator: Some(",".to_string()),
            output: output(json!({
                "name": "enumName",
                "values": [{ "code": "valueCode", "desc": "valueDesc" }]
            })),
        },
        examples: vec![RuleExample {
            input: "Gender @enum(GENDER:male:Male,female:Female)".to_string(),
            output: json!({
                "comment": "Gender",
                "rules": {
                    "enum": {
                        "name": "GENDER",
                        "values": [
                            { "code": "male", "desc": "Male" },
                            { "code": "female", "desc": "Female" }
                        ]
                    }
                }
            }),
        }],
    }
}

/// `@dict(CODE)`
fn dict_rule() -> RuleDefinition {
    RuleDefinition {
        name: DICT_RULE.to_string(),
        pattern: r"@dict\(([A-Za-z0-9_]+)\)".to_string(),
        description: Some("Dictionary reference".to_string()),
        params: vec![param("dictCode", 1, "Dictionary code")],
        parse: RuleParse {
            value_format: None,
            separator: None,
            output: output(json!({ "code": "dictCode" })),
        },
        examples: vec![RuleExample {
            input: "Status @dict(STATUS_TYPE)".to_string(),
            output: json!({
                "comment": "Status",
                "rules": { "dict": { "code": "STATUS_TYPE" } }
            }),
        }],
    }
}

/// `@ignore`
fn ignore_rule() -> RuleDefinition {
    RuleDefinition {
        name: IGNORE_RULE.to_string(),
        pattern: "@ignore".to_string(),
        description: Some("Excludes the field from transfer objects".to_string()),
        params: Vec::new(),
        parse: RuleParse {
            value_format: None,
            separator: None,
            output: output(json!({ "ignore": true })),
        },
        examples: vec![RuleExample {
            input: "Internal field @ignore".to_string(),
            output: json!({ "comment": "Internal field", "rules": { "ignore": true } }),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_ordered_and_uniquely_named() {
        let names: Vec<_> = builtin_rules().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec![ENUM_RULE, DICT_RULE, IGNORE_RULE]);
    }

    #[test]
    fn builtin_patterns_compile() {
        for rule in builtin_rules() {
            assert!(regex::Regex::new(&rule.pattern).is_ok(), "{}", rule.name);
        }
    }
}
