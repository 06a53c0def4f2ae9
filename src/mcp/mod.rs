//! Model Context Protocol (MCP) over JSON-RPC 2.0
//!
//! Only the tool surface is implemented: `initialize`, `ping`, `tools/list`
//! and `tools/call`. Transport lives in [`crate::api`].

/// Wire types.
pub mod protocol;
/// Method dispatch.
pub mod server;

pub use server::McpServer;
