use codesmith::config::GroupConfig;
use codesmith::rules::{RuleRegistry, RuleSet, IGNORE_RULE};
use serde_json::json;
use test_log::test;

fn group(value: serde_json::Value) -> GroupConfig {
    serde_json::from_value(value).unwrap()
}

#[test]
fn directives_three_levels_deep_reach_every_ancestor() {
    let data = json!({
        "module": {
            "table": {
                "column": { "comment": "Status @dict(STATUS)" },
                "name": "t_user"
            }
        },
        "count": 3
    });

    let transformed = RuleSet::builtin().transform(&data);
    let expected_rules = json!({ "dict": { "code": "STATUS" } });

    let cleaned = &transformed.cleaned;
    assert_eq!(cleaned["module"]["table"]["column"]["comment"], "Status");
    assert_eq!(cleaned["module"]["table"]["column"]["_rules"], expected_rules);
    assert_eq!(cleaned["module"]["table"]["_rules"], expected_rules);
    assert_eq!(cleaned["module"]["_rules"], expected_rules);
    assert_eq!(cleaned["_rules"], expected_rules);
    assert_eq!(cleaned["count"], 3);
    assert_eq!(cleaned["module"]["table"]["name"], "t_user");
    assert_eq!(serde_json::Value::Object(transformed.rules), expected_rules);
}

#[test]
fn mappings_without_directives_gain_no_rules_key() {
    let data = json!({ "a": { "b": "plain" }, "c": [1, "two"] });
    let transformed = RuleSet::builtin().transform(&data);
    assert_eq!(transformed.cleaned, data);
    assert!(transformed.rules.is_empty());
}

#[test]
fn co_occurring_directives_are_all_extracted() {
    let (cleaned, rules) = RuleSet::builtin()
        .apply_text("Kind @ignore @enum(KIND:a:Alpha,b:Beta) @dict(KIND)");
    assert_eq!(cleaned, "Kind");
    assert_eq!(rules[IGNORE_RULE], true);
    assert_eq!(rules["dict"], json!({ "code": "KIND" }));
    assert_eq!(
        rules["enum"],
        json!({ "name": "KIND", "values": [
            { "code": "a", "desc": "Alpha" },
            { "code": "b", "desc": "Beta" }
        ] })
    );
}

#[test]
fn malformed_enum_entries_are_dropped() {
    let (_, rules) = RuleSet::builtin().apply_text("@enum(E:1:One,broken,:nodesc,2:Two)");
    assert_eq!(
        rules["enum"]["values"],
        json!([{ "code": "1", "desc": "One" }, { "code": "2", "desc": "Two" }])
    );
}

#[test]
fn only_the_first_occurrence_is_recognized() {
    let (cleaned, rules) = RuleSet::builtin().apply_text("@dict(A) and @dict(B)");
    assert_eq!(cleaned, "and @dict(B)");
    assert_eq!(rules["dict"]["code"], "A");
}

#[test]
fn custom_rule_replaces_builtin_of_same_name() {
    let config = group(json!({
        "name": "java",
        "rules": [{
            "name": "enum",
            "pattern": "\\[enum:(\\w+)\\]",
            "params": [{ "name": "enumName", "group": 1 }],
            "parse": { "output": { "type": "enumName", "custom": true } }
        }]
    }));
    let registry = config.rule_registry();
    assert_eq!(registry.len(), RuleRegistry::builtin().len());

    let rules = registry.compile();
    let (cleaned, found) = rules.apply_text("Sex [enum:Gender] @enum(OLD:1:x)");
    assert_eq!(cleaned, "Sex  @enum(OLD:1:x)");
    assert_eq!(found["enum"], json!({ "type": "Gender", "custom": true }));
}

#[test]
fn invalid_custom_pattern_is_skipped() {
    let config = group(json!({
        "name": "java",
        "rules": [
            { "name": "broken", "pattern": "@broken(", "params": [] },
            { "name": "readonly", "pattern": "@readonly" }
        ]
    }));
    let registry = config.rule_registry();
    assert_eq!(registry.len(), 5);

    let rules = registry.compile();
    assert_eq!(rules.rules().len(), 4);
    let (cleaned, found) = rules.apply_text("Id @readonly @ignore");
    assert_eq!(cleaned, "Id");
    assert_eq!(found["readonly"], true);
    assert_eq!(found["ignore"], true);
}
