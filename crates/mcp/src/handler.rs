// MCP request handling: routes JSON-RPC methods to the tool registry

use crate::error::ToolError;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

pub const SERVER_NAME: &str = "Slack MCP Server";

/// Dispatches MCP requests. Holds no per-request state, so one handler can
/// serve any number of concurrent calls.
pub struct McpHandler {
    registry: ToolRegistry,
    server_info: ServerInfo,
}

impl McpHandler {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one JSON-RPC message. Notifications yield `None`.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "received notification");
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::from_result(
                id,
                &ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.tools_call(id, request.params).await,
            other => {
                debug!(method = %other, "unsupported method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))
            }
        };
        Some(response)
    }

    fn initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            info!(client = %client.name, version = %client.version, "client connected");
        }

        JsonRpcResponse::from_result(
            id,
            &InitializeResult {
                protocol_version: params
                    .protocol_version
                    .unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                },
                server_info: self.server_info.clone(),
            },
        )
    }

    async fn tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value::<CallToolParams>) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {e}")),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("tools/call requires params"),
                )
            }
        };

        let result = self.call_tool(&params.name, params.arguments).await;
        debug!(
            tool = %params.name,
            is_error = result.is_error.unwrap_or(false),
            bytes = result.first_text().map_or(0, str::len),
            "tool call finished"
        );
        JsonRpcResponse::from_result(id, &result)
    }

    /// Run a tool and wrap the outcome as MCP tool content.
    ///
    /// Success is the Slack response pretty-printed; any failure becomes a
    /// single-line `{"error": ...}` payload with `isError` set.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> CallToolResult {
        info!(tool = %name, "Received tool call");
        debug!(tool = %name, arguments = %arguments, "tool arguments");

        let outcome = self
            .registry
            .call(name, arguments)
            .await
            .and_then(|value| serde_json::to_string_pretty(&value).map_err(ToolError::from));

        match outcome {
            Ok(text) => CallToolResult::text(text),
            Err(e) => {
                match &e {
                    ToolError::InvalidArguments(_) => {
                        warn!(tool = %name, error = %e, "Validation error for tool")
                    }
                    _ => warn!(tool = %name, error = %e, "Error executing tool"),
                }
                CallToolResult::error(error_text(&e.to_string()))
            }
        }
    }
}

/// Render `{"error": "<message>"}`, with `": "` as the key separator.
fn error_text(message: &str) -> String {
    format!("{{\"error\": {}}}", Value::String(message.to_string()))
}
