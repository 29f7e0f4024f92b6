use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::{RuleDefinition, RuleParam};

/// Payload layout of a compiled rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputShape {
    /// No params: the payload is `true` whenever the directive is present.
    Flag,
    /// Payload is an object assembled from `parse.output` and the captures.
    Object,
}

/// Two-placeholder item layout such as `{code}:{desc}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueFormat {
    pub first: String,
    pub delimiter: String,
    pub second: String,
}

impl ValueFormat {
    /// Returns `None` for layouts that are not exactly `{a}<delimiter>{b}`.
    pub fn parse(format: &str) -> Option<Self> {
        let rest = format.strip_prefix('{')?;
        let (first, rest) = rest.split_once('}')?;
        let rest = rest.strip_suffix('}')?;
        let (delimiter, second) = rest.rsplit_once('{')?;
        if first.is_empty() || second.is_empty() || delimiter.is_empty() {
            return None;
        }
        Some(Self {
            first: first.to_string(),
            delimiter: delimiter.to_string(),
            second: second.to_string(),
        })
    }

    /// Splits on the first delimiter. Items without it, or with an empty
    /// first part, yield `None`.
    fn split(&self, item: &str) -> Option<Value> {
        let (first, second) = item.split_once(self.delimiter.as_str())?;
        let first = first.trim();
        if first.is_empty() {
            return None;
        }
        let mut object = Map::new();
        object.insert(self.first.clone(), Value::String(first.to_string()));
        object.insert(self.second.clone(), Value::String(second.trim().to_string()));
        Some(Value::Object(object))
    }
}

/// Result of applying one rule to one string.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub cleaned: String,
    /// `None` when the directive does not occur in the text.
    pub payload: Option<Value>,
}

/// A [`RuleDefinition`] with its pattern compiled.
#[derive(Debug, Clone)]
pub struct Rule {
    definition: RuleDefinition,
    regex: Regex,
    shape: OutputShape,
    value_format: Option<ValueFormat>,
}

impl Rule {
    pub fn compile(definition: RuleDefinition) -> Result<Self, regex::Error> {
        let regex = Regex::new(&definition.pattern)?;
        let shape = if definition.params.is_empty() {
            OutputShape::Flag
        } else {
            OutputShape::Object
        };
        let value_format =
            definition.parse.value_format.as_deref().and_then(ValueFormat::parse);
        Ok(Self { definition, regex, shape, value_format })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &RuleDefinition {
        &self.definition
    }

    pub fn shape(&self) -> OutputShape {
        self.shape
    }

    /// Removes the first occurrence of the directive and trims the rest.
    ///
    /// Never fails: text without the directive comes back unchanged with no payload.
    ///
    /// # Examples
    /// ```
    /// use codesmith::rules::{builtin_rules, Rule};
    ///
    /// let dict = Rule::compile(builtin_rules().remove(1)).unwrap();
    /// let annotation = dict.apply("Status @dict(STATUS_TYPE)");
    /// assert_eq!(annotation.cleaned, "Status");
    /// assert_eq!(annotation.payload.unwrap()["code"], "STATUS_TYPE");
    /// ```
    pub fn apply(&self, text: &str) -> Annotation {
        let Some(captures) = self.regex.captures(text) else {
            return Annotation { cleaned: text.to_string(), payload: None };
        };
        let Some(span) = captures.get(0) else {
            return Annotation { cleaned: text.to_string(), payload: None };
        };

        let cleaned = format!("{}{}", &text[..span.start()], &text[span.end()..])
            .trim()
            .to_string();

        let payload = match self.shape {
            OutputShape::Flag => Value::Bool(true),
            OutputShape::Object => self.build_object(&captures),
        };

        Annotation { cleaned, payload: Some(payload) }
    }

    fn build_object(&self, captures: &Captures<'_>) -> Value {
        let values: Map<String, Value> = self
            .definition
            .params
            .iter()
            .filter_map(|param| {
                let matched = captures.get(param.group)?;
                Some((param.name.clone(), self.param_value(param, matched.as_str())))
            })
            .collect();

        let output = &self.definition.parse.output;
        if output.is_empty() {
            return Value::Object(values);
        }

        let mut payload = Map::new();
        for (key, spec) in output {
            match spec {
                Value::String(name) if self.declares_param(name) => {
                    if let Some(value) = values.get(name) {
                        payload.insert(key.clone(), value.clone());
                    }
                }
                Value::Array(_) => {
                    if let Some(list) = self.list_value(&values) {
                        payload.insert(key.clone(), list.clone());
                    }
                }
                literal => {
                    payload.insert(key.clone(), literal.clone());
                }
            }
        }
        Value::Object(payload)
    }

    fn declares_param(&self, name: &str) -> bool {
        self.definition.params.iter().any(|param| param.name == name)
    }

    fn list_value<'v>(&self, values: &'v Map<String, Value>) -> Option<&'v Value> {
        self.definition
            .params
            .iter()
            .filter(|param| param.separator.is_some())
            .find_map(|param| values.get(&param.name))
    }

    fn param_value(&self, param: &RuleParam, raw: &str) -> Value {
        let Some(separator) = param.separator.as_deref().filter(|s| !s.is_empty()) else {
            return Value::String(raw.to_string());
        };

        let items = raw.split(separator).map(str::trim);
        let values: Vec<Value> = match &self.value_format {
            Some(format) => items.filter_map(|item| format.split(item)).collect(),
            None => items
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        };
        Value::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{builtin_rules, RuleParse};
    use serde_json::json;

    fn builtin(name: &str) -> Rule {
        let definition = builtin_rules().into_iter().find(|r| r.name == name).unwrap();
        Rule::compile(definition).unwrap()
    }

    #[test]
    fn enum_directive_is_stripped_and_parsed() {
        let annotation = builtin("enum").apply("性别 @enum(GENDER:male:男,female:女)");
        assert_eq!(annotation.cleaned, "性别");
        assert_eq!(
            annotation.payload,
            Some(json!({
                "name": "GENDER",
                "values": [
                    { "code": "male", "desc": "男" },
                    { "code": "female", "desc": "女" }
                ]
            }))
        );
    }

    #[test]
    fn enum_entries_without_delimiter_are_dropped() {
        let annotation = builtin("enum").apply("Kind @enum(KIND:a:Alpha,broken,:nocode,b:Beta)");
        assert_eq!(
            annotation.payload.unwrap()["values"],
            json!([{ "code": "a", "desc": "Alpha" }, { "code": "b", "desc": "Beta" }])
        );
    }

    #[test]
    fn enum_value_splits_on_first_delimiter_only() {
        let annotation = builtin("enum").apply("@enum(T:x:a:b)");
        assert_eq!(annotation.cleaned, "");
        assert_eq!(annotation.payload.unwrap()["values"], json!([{ "code": "x", "desc": "a:b" }]));
    }

    #[test]
    fn dict_directive_round_trip() {
        let annotation = builtin("dict").apply("状态 @dict(STATUS_TYPE)");
        assert_eq!(annotation.cleaned, "状态");
        assert_eq!(annotation.payload, Some(json!({ "code": "STATUS_TYPE" })));
    }

    #[test]
    fn ignore_directive_yields_true() {
        let annotation = builtin("ignore").apply("内部字段 @ignore");
        assert_eq!(annotation.cleaned, "内部字段");
        assert_eq!(annotation.payload, Some(Value::Bool(true)));
    }

    #[test]
    fn text_without_directive_is_untouched() {
        for rule in builtin_rules().into_iter().map(|d| Rule::compile(d).unwrap()) {
            let annotation = rule.apply("  plain comment, with (parens) @ sign ");
            assert_eq!(annotation.cleaned, "  plain comment, with (parens) @ sign ");
            assert_eq!(annotation.payload, None);
        }
    }

    #[test]
    fn directive_in_the_middle_of_text() {
        let annotation = builtin("dict").apply("before @dict(CODE) after");
        assert_eq!(annotation.cleaned, "before  after");
    }

    #[test]
    fn only_first_occurrence_is_recognized() {
        let annotation = builtin("dict").apply("@dict(A) @dict(B)");
        assert_eq!(annotation.cleaned, "@dict(B)");
        assert_eq!(annotation.payload, Some(json!({ "code": "A" })));
    }

    #[test]
    fn malformed_enum_is_left_as_text() {
        let annotation = builtin("enum").apply("Kind @enum(KIND)");
        assert_eq!(annotation.cleaned, "Kind @enum(KIND)");
        assert!(annotation.payload.is_none());
    }

    #[test]
    fn codes_are_ascii_word_characters() {
        let annotation = builtin("dict").apply("状态 @dict(状态)");
        assert_eq!(annotation.cleaned, "状态 @dict(状态)");
        assert_eq!(annotation.payload, None);

        let annotation = builtin("enum").apply("性别 @enum(性别:1:男)");
        assert_eq!(annotation.cleaned, "性别 @enum(性别:1:男)");
        assert_eq!(annotation.payload, None);

        let annotation = builtin("dict").apply("@dict(Status_2)");
        assert_eq!(annotation.payload, Some(json!({ "code": "Status_2" })));
    }

    #[test]
    fn custom_rule_without_output_uses_param_names() {
        let rule = Rule::compile(RuleDefinition {
            name: "len".into(),
            pattern: r"@len\((\d+),(\d+)\)".into(),
            description: None,
            params: vec![
                RuleParam { name: "min".into(), group: 1, description: None, separator: None },
                RuleParam { name: "max".into(), group: 2, description: None, separator: None },
            ],
            parse: RuleParse::default(),
            examples: vec![],
        })
        .unwrap();
        let annotation = rule.apply("Name @len(1,64)");
        assert_eq!(annotation.cleaned, "Name");
        assert_eq!(annotation.payload, Some(json!({ "min": "1", "max": "64" })));
    }

    #[test]
    fn custom_list_rule_without_value_format() {
        let mut output = Map::new();
        output.insert("tags".into(), json!([]));
        output.insert("kind".into(), json!("label"));
        let rule = Rule::compile(RuleDefinition {
            name: "tags".into(),
            pattern: r"@tags\(([^)]*)\)".into(),
            description: None,
            params: vec![RuleParam {
                name: "list".into(),
                group: 1,
                description: None,
                separator: Some("|".into()),
            }],
            parse: RuleParse { value_format: None, separator: None, output },
            examples: vec![],
        })
        .unwrap();
        let annotation = rule.apply("@tags(a| b ||c)");
        assert_eq!(annotation.payload, Some(json!({ "tags": ["a", "b", "c"], "kind": "label" })));
    }

    #[test]
    fn value_format_parsing() {
        assert_eq!(
            ValueFormat::parse("{code}:{desc}"),
            Some(ValueFormat {
                first: "code".into(),
                delimiter: ":".into(),
                second: "desc".into()
            })
        );
        assert_eq!(ValueFormat::parse("{code}{desc}"), None);
        assert_eq!(ValueFormat::parse("code:desc"), None);
    }
}
