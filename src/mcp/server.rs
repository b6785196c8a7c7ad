//! The stdio serve loop.
//!
//! Reads line-delimited JSON-RPC frames from stdin, dispatches requests, and
//! writes responses to stdout. Logging goes to stderr so the protocol stream
//! stays clean.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::protocol::{
    classify_message, CallToolParams, InitializeResult, JsonRpcRequest, JsonRpcResponse,
    MessageKind, ServerCapabilities, ServerInfo, ToolsCapability, ToolsListResult,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};
use super::tools::{ToolCallError, ToolRouter};

/// Server name reported in the `initialize` handshake
const SERVER_NAME: &str = "truelist";

/// MCP server over line-delimited stdio
pub struct McpServer {
    /// Tool router handling `tools/call`
    router: ToolRouter,
}

impl McpServer {
    /// Create a server around a tool router
    pub fn new(router: ToolRouter) -> Self {
        Self { router }
    }

    /// Run the serve loop until stdin closes
    pub async fn serve(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        info!("truelist-mcp serving on stdio");

        while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut frame = serde_json::to_string(&response)
                    .context("Failed to serialize JSON-RPC response")?;
                frame.push('\n');
                stdout
                    .write_all(frame.as_bytes())
                    .await
                    .context("Failed to write to stdout")?;
                stdout.flush().await.context("Failed to flush stdout")?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one incoming frame; `None` means nothing is written back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let json: Value = match serde_json::from_str(line) {
            Ok(json) => json,
            Err(e) => {
                warn!("Discarding malformed frame: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        match classify_message(&json) {
            MessageKind::Request { id } => {
                let request: JsonRpcRequest = match serde_json::from_value(json) {
                    Ok(request) => request,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            INVALID_REQUEST,
                            format!("Invalid request: {}", e),
                        ));
                    }
                };
                Some(
                    self.handle_request(id, &request.method, request.params.as_ref())
                        .await,
                )
            }
            MessageKind::Notification => {
                debug!(
                    "Ignoring notification: {}",
                    json.get("method").and_then(|v| v.as_str()).unwrap_or("?")
                );
                None
            }
            MessageKind::Response => {
                // This server never sends requests, so response frames are stray
                debug!("Ignoring stray response frame");
                None
            }
        }
    }

    /// Dispatch a single request to its handler
    async fn handle_request(
        &self,
        id: Value,
        method: &str,
        params: Option<&Value>,
    ) -> JsonRpcResponse {
        match method {
            "initialize" => {
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION,
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability::default(),
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME,
                        version: env!("CARGO_PKG_VERSION"),
                    },
                };
                json_success(id, &result)
            }
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => {
                let result = ToolsListResult {
                    tools: ToolRouter::definitions(),
                };
                json_success(id, &result)
            }
            "tools/call" => {
                let params: CallToolParams = match params
                    .cloned()
                    .ok_or_else(|| "Missing params".to_string())
                    .and_then(|p| serde_json::from_value(p).map_err(|e| e.to_string()))
                {
                    Ok(params) => params,
                    Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e),
                };

                debug!("Calling tool {}", params.name);
                match self.router.call(&params.name, params.arguments.as_ref()).await {
                    Ok(result) => json_success(id, &result),
                    Err(e @ ToolCallError::Internal(_)) => {
                        JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string())
                    }
                    Err(e) => JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
                }
            }
            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        }
    }
}

/// Serialize a result payload into a success response
fn json_success<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
    }
}
