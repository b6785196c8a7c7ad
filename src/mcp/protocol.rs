//! JSON-RPC protocol types for MCP communication.
//!
//! This module defines the message structures used in the JSON-RPC 2.0
//! protocol spoken over stdio with an MCP host.
//!
//! # Protocol Overview
//!
//! - **Requests**: Host → server (e.g. `initialize`, `tools/call`); carry an
//!   `id` that is echoed back verbatim (hosts may use numbers or strings).
//! - **Responses**: Server → host (result or error).
//! - **Notifications**: Host → server (e.g. `notifications/initialized`);
//!   never answered.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision implemented by this server
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC 2.0 error code: malformed JSON
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC 2.0 error code: not a valid request object
pub const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC 2.0 error code: unknown method
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC 2.0 error code: invalid method parameters
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC 2.0 error code: internal server error
pub const INTERNAL_ERROR: i64 = -32603;

/// JSON-RPC request as received from the host
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    /// Creates a success response echoing the request id.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Creates an error response echoing the request id.
    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Classification of an incoming JSON-RPC message.
///
/// Used by the serve loop to determine how to handle each frame:
///
/// - `Request` → dispatched and answered
/// - `Notification` → consumed silently
/// - `Response` → ignored (this server sends no requests of its own)
#[derive(Debug, PartialEq)]
pub enum MessageKind {
    /// A request we must answer (has `id` + `method`).
    Request { id: Value },
    /// A notification (has `method`, no `id`).
    Notification,
    /// A response frame (has `id`, no `method`).
    Response,
}

/// Classify a JSON-RPC message by inspecting `id` and `method` fields.
///
/// Pure function with no side effects, called once per incoming frame.
pub fn classify_message(json: &Value) -> MessageKind {
    let id = json.get("id").filter(|v| !v.is_null());
    let method = json.get("method").and_then(|v| v.as_str());

    match (id, method) {
        (Some(id), Some(_)) => MessageKind::Request { id: id.clone() },
        (None, Some(_)) => MessageKind::Notification,
        _ => MessageKind::Response,
    }
}

/// Result payload of the `initialize` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: &'static str,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Capabilities advertised during the handshake
#[derive(Debug, Clone, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

/// Marker object signalling tool support
#[derive(Debug, Clone, Default, Serialize)]
pub struct ToolsCapability {}

/// Server identity reported during the handshake
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// A callable tool as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result payload of the `tools/list` request
#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDefinition>,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Result payload of a `tools/call` request
#[derive(Debug, Clone, Serialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    /// Successful tool result carrying one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: false,
        }
    }

    /// Failed tool result carrying the failure message in-band.
    pub fn error_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
            is_error: true,
        }
    }
}

/// One content block of a tool result
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Plain text content
    Text { text: String },
}

impl ToolContent {
    /// Creates a text content block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}
