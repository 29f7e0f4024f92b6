//! MCP tools for codesmith. Each tool returns its operation's result as
//! pretty-printed JSON.

use crate::module::ModuleRequest;
use crate::tools::{CodeGenerator, GenerateCodeRequest};
use rust_mcp_sdk::macros;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize result: {e}"))
}

fn to_map(data: &HashMap<String, Value>) -> Map<String, Value> {
    data.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// The `data` object of raw call arguments, keys in the caller's order.
pub fn ordered_data(arguments: Option<&Map<String, Value>>) -> Map<String, Value> {
    arguments
        .and_then(|args| args.get("data"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

#[macros::mcp_tool(
    name = "list_groups",
    description = "Lists the template groups of the template root with the number of templates in each."
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct ListGroupsTool {}

impl ListGroupsTool {
    pub fn execute(generator: &CodeGenerator) -> Result<String, String> {
        to_json(&generator.list_groups())
    }
}

#[macros::mcp_tool(
    name = "list_templates",
    description = "Lists the templates of a group with their renderer type, description and declared input parameters."
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct ListTemplatesTool {
    /// Template group name
    pub group: String,
}

impl ListTemplatesTool {
    pub fn execute(&self, generator: &CodeGenerator) -> Result<String, String> {
        let output = generator.list_templates(&self.group).map_err(|e| e.to_string())?;
        to_json(&output)
    }
}

#[macros::mcp_tool(
    name = "get_template_config",
    description = "Returns a group's configuration, optionally narrowed to one template, including the annotation rules (@enum, @dict, @ignore and custom ones) its data may carry."
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GetTemplateConfigTool {
    /// Template group name
    pub group: String,
    /// Template name; the whole group when omitted
    pub template: Option<String>,
}

impl GetTemplateConfigTool {
    pub fn execute(&self, generator: &CodeGenerator) -> Result<String, String> {
        let output = generator
            .get_template_config(&self.group, self.template.as_deref())
            .map_err(|e| e.to_string())?;
        to_json(&output)
    }
}

#[macros::mcp_tool(
    name = "parse_rules",
    description = "Previews annotation extraction: strips directives from every string in the data and reports the cleaned data and the extracted rules."
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct ParseRulesTool {
    /// Template group whose rules apply
    pub group: String,
    /// Data to parse
    pub data: HashMap<String, Value>,
}

impl ParseRulesTool {
    /// `data` is [`ordered_data`] of the same call; the field only validates it.
    pub fn execute(
        &self,
        data: Map<String, Value>,
        generator: &CodeGenerator,
    ) -> Result<String, String> {
        let output = generator
            .parse_rules(&self.group, Value::Object(data))
            .map_err(|e| e.to_string())?;
        to_json(&output)
    }
}

#[macros::mcp_tool(
    name = "generate_code",
    description = "Renders one template of a group with the given data and writes the result to output_path."
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GenerateCodeTool {
    /// Template group name
    pub group: String,
    /// Template name
    pub template: String,
    /// Template data; strings may carry annotations
    pub data: HashMap<String, Value>,
    /// File to write
    pub output_path: String,
}

impl GenerateCodeTool {
    /// `data` is [`ordered_data`] of the same call; the field only validates it.
    pub fn execute(
        &self,
        data: Map<String, Value>,
        generator: &CodeGenerator,
    ) -> Result<String, String> {
        let request = GenerateCodeRequest {
            group: self.group.clone(),
            template: self.template.clone(),
            data,
            output_path: self.output_path.clone().into(),
        };
        to_json(&generator.generate_code(&request))
    }
}

#[macros::mcp_tool(
    name = "generate_module",
    description = "Generates every artifact of a module (entity, dto, form, query, converter, mapper, mapper-xml, service, service-impl, controller and enums). The request holds group, basePackage, moduleName, className, tableName, outputDir, fields and optionally comment, resourcesDir, author, date, version, email and templates."
)]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct GenerateModuleTool {
    /// Module request in camelCase
    pub request: HashMap<String, Value>,
}

impl GenerateModuleTool {
    pub fn execute(&self, generator: &CodeGenerator) -> Result<String, String> {
        let request: ModuleRequest = serde_json::from_value(Value::Object(to_map(&self.request)))
            .map_err(|e| format!("Invalid module request: {e}"))?;
        to_json(&generator.generate_module(&request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_groups_without_root() {
        let output = ListGroupsTool::execute(&CodeGenerator::default()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, json!({ "groups": [] }));
    }

    #[test]
    fn test_parse_rules_keeps_argument_order() {
        let args = json!({
            "group": "java",
            "data": { "zeta": "Z @dict(LATE)", "alpha": "A @dict(EARLY)", "mid": 1 }
        });
        let args = args.as_object().unwrap();
        let tool: ParseRulesTool = serde_json::from_value(Value::Object(args.clone())).unwrap();

        let output = tool.execute(ordered_data(Some(args)), &CodeGenerator::default()).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        let original: Vec<_> = value["original"].as_object().unwrap().keys().collect();
        assert_eq!(original, ["zeta", "alpha", "mid"]);
        let parsed: Vec<_> = value["parsed"].as_object().unwrap().keys().collect();
        assert_eq!(parsed, ["zeta", "alpha", "mid", "_rules"]);
        assert_eq!(value["extractedRules"]["dict"]["code"], "EARLY");
    }

    #[test]
    fn test_ordered_data_without_object() {
        assert!(ordered_data(None).is_empty());
        let args = json!({ "data": [1] });
        assert!(ordered_data(args.as_object()).is_empty());
    }

    #[test]
    fn test_invalid_module_request() {
        let tool = GenerateModuleTool { request: HashMap::new() };
        let err = tool.execute(&CodeGenerator::default()).unwrap_err();
        assert!(err.starts_with("Invalid module request"));
    }
}
