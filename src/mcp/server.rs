//! MCP server implementation for codesmith.

use super::handler::CodesmithHandler;
use crate::tools::CodeGenerator;
use rust_mcp_sdk::{
    error::SdkResult,
    mcp_server::{server_runtime, McpServerOptions, ServerRuntime, ToMcpServerHandler},
    schema::{
        Implementation, InitializeResult, ProtocolVersion, ServerCapabilities,
        ServerCapabilitiesTools,
    },
    McpServer, StdioTransport, TransportOptions,
};
use std::sync::Arc;

/// Run the codesmith MCP server over stdio.
pub async fn run_mcp_server(generator: CodeGenerator) -> SdkResult<()> {
    let server_details = InitializeResult {
        server_info: Implementation {
            name: "codesmith".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            title: Some("Codesmith Code Generator".into()),
            description: Some(
                "Generates source files from template groups and annotated data.".into(),
            ),
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some(
            "Use list_groups and list_templates to discover templates, get_template_config \
             to see the inputs and annotation rules a group expects, then generate_code for \
             a single file or generate_module for a whole module."
                .into(),
        ),
        protocol_version: ProtocolVersion::V2025_11_25.into(),
    };

    let transport = StdioTransport::new(TransportOptions::default())?;
    let handler = CodesmithHandler::new(generator);

    let server: Arc<ServerRuntime> = server_runtime::create_server(McpServerOptions {
        server_details,
        transport,
        handler: handler.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    server.start().await
}
