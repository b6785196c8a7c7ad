/*!
 * Model Context Protocol server layer.
 *
 * JSON-RPC 2.0 over line-delimited stdio:
 * - `mcp::protocol`: frame types, message classification, MCP payloads
 * - `mcp::tools`: tool definitions and call routing
 * - `mcp::server`: the stdio serve loop and request dispatch
 */

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
pub use tools::ToolRouter;
