//! JSON-RPC method dispatch for the tool server

use crate::mcp::protocol::{
    JsonRpcRequest, JsonRpcResponse, McpToolCall, McpToolResult, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use crate::types::{AppError, rpc_codes};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Dispatches MCP requests to the tool registry
pub struct McpServer {
    tools: Arc<ToolRegistry>,
    server_name: String,
    server_version: String,
}

impl McpServer {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            tools,
            server_name: env!("CARGO_PKG_NAME").to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Handle one request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Received notification");
            return None;
        }

        debug!(method = %request.method, id = ?request.id, "Handling JSON-RPC request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_list_tools(request.id),
            "tools/call" => self.handle_call_tool(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                rpc_codes::METHOD_NOT_FOUND,
                format!("Unknown method: {}", request.method),
            ),
        };

        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": self.server_name,
                    "version": self.server_version
                }
            }),
        )
    }

    fn handle_list_tools(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(
            id,
            json!({ "tools": self.tools.get_tool_definitions() }),
        )
    }

    async fn handle_call_tool(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(
                id,
                rpc_codes::INVALID_PARAMS,
                "Missing params for tools/call",
            );
        };

        let call: McpToolCall = match serde_json::from_value(params) {
            Ok(c) => c,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    rpc_codes::INVALID_PARAMS,
                    format!("Invalid tool call params: {}", e),
                );
            }
        };

        let output = match self.tools.execute(&call.name, call.arguments).await {
            Ok(output) => output,
            Err(e @ (AppError::NotFound(_) | AppError::InvalidInput(_))) => {
                return JsonRpcResponse::error(id, e.rpc_code(), e.to_string());
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                crate::types::ToolOutput::error(e.to_string())
            }
        };

        if output.is_error {
            debug!(tool = %call.name, "Tool reported an error result");
        }

        match serde_json::to_value(McpToolResult::from(output)) {
            Ok(v) => JsonRpcResponse::success(id, v),
            Err(e) => JsonRpcResponse::error(
                id,
                rpc_codes::INTERNAL_ERROR,
                format!("Failed to serialize tool result: {}", e),
            ),
        }
    }
}
