//! MCP (Model Context Protocol) server support for codesmith.
//!
//! Exposes the six operations of [`crate::tools::CodeGenerator`] as tools:
//! `list_groups`, `list_templates`, `get_template_config`, `parse_rules`,
//! `generate_code` and `generate_module`.
//!
//! Start the server with:
//! ```bash
//! codesmith mcp
//! ```
//!
//! The server communicates over stdio using the MCP protocol.

mod handler;
mod server;
mod tools;

pub use handler::CodesmithHandler;
pub use server::run_mcp_server;
pub use tools::{
    GenerateCodeTool, GenerateModuleTool, GetTemplateConfigTool, ListGroupsTool,
    ListTemplatesTool, ParseRulesTool,
};
