// MCP (Model Context Protocol) server exposing Slack tools to agent hosts
// over line-delimited JSON-RPC on stdio.

pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::{ToolError, TransportError};
pub use handler::McpHandler;
pub use server::McpServer;
