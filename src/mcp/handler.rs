//! MCP server handler for codesmith.

use super::tools::{
    ordered_data, GenerateCodeTool, GenerateModuleTool, GetTemplateConfigTool, ListGroupsTool,
    ListTemplatesTool, ParseRulesTool,
};
use crate::tools::CodeGenerator;
use async_trait::async_trait;
use rust_mcp_sdk::{
    mcp_server::ServerHandler,
    schema::{
        schema_utils::CallToolError, CallToolRequestParams, CallToolResult, ListToolsResult,
        PaginatedRequestParams, RpcError, TextContent,
    },
    McpServer,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Serves the operations of one [`CodeGenerator`].
#[derive(Default)]
pub struct CodesmithHandler {
    generator: CodeGenerator,
}

impl CodesmithHandler {
    pub fn new(generator: CodeGenerator) -> Self {
        Self { generator }
    }
}

fn text_content(text: impl Into<String>) -> TextContent {
    TextContent::new(text.into(), None, None)
}

fn parse_args<T: DeserializeOwned>(
    tool: &str,
    arguments: Option<Map<String, Value>>,
) -> Result<T, CallToolError> {
    let arguments = arguments.unwrap_or_default();
    serde_json::from_value(Value::Object(arguments)).map_err(|e| {
        CallToolError::invalid_arguments(tool, Some(format!("Invalid arguments: {e}")))
    })
}

#[async_trait]
impl ServerHandler for CodesmithHandler {
    async fn handle_list_tools_request(
        &self,
        _params: Option<PaginatedRequestParams>,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: vec![
                ListGroupsTool::tool(),
                ListTemplatesTool::tool(),
                GetTemplateConfigTool::tool(),
                ParseRulesTool::tool(),
                GenerateCodeTool::tool(),
                GenerateModuleTool::tool(),
            ],
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_call_tool_request(
        &self,
        params: CallToolRequestParams,
        _runtime: Arc<dyn McpServer>,
    ) -> Result<CallToolResult, CallToolError> {
        let name = params.name.as_str();
        let generator = &self.generator;
        let result = match name {
            "list_groups" => ListGroupsTool::execute(generator),
            "list_templates" => {
                parse_args::<ListTemplatesTool>(name, params.arguments)?.execute(generator)
            }
            "get_template_config" => {
                parse_args::<GetTemplateConfigTool>(name, params.arguments)?.execute(generator)
            }
            "parse_rules" => {
                let data = ordered_data(params.arguments.as_ref());
                parse_args::<ParseRulesTool>(name, params.arguments)?.execute(data, generator)
            }
            "generate_code" => {
                let data = ordered_data(params.arguments.as_ref());
                parse_args::<GenerateCodeTool>(name, params.arguments)?.execute(data, generator)
            }
            "generate_module" => {
                parse_args::<GenerateModuleTool>(name, params.arguments)?.execute(generator)
            }
            _ => return Err(CallToolError::unknown_tool(params.name.clone())),
        };

        let text = result.unwrap_or_else(|e| format!("Error: {e}"));
        Ok(CallToolResult::text_content(vec![text_content(text)]))
    }
}
