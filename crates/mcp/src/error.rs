// Error types for tool dispatch and the stdio transport

use slack_mcp_client::SlackError;
use thiserror::Error;

/// Errors raised while resolving or running a tool.
///
/// All of these are reported back to the host as a tool result carrying
/// `{"error": "<message>"}`; none of them stop the server.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not match the tool's schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The Slack call itself failed (transport or undecodable body).
    #[error("{0}")]
    Execution(String),

    /// A second tool tried to register under an existing name.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}

impl From<SlackError> for ToolError {
    fn from(e: SlackError) -> Self {
        Self::Execution(e.to_string())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        Self::Execution(e.to_string())
    }
}

/// Errors from the line-delimited stdio transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to read from the input stream.
    #[error("read error: {0}")]
    Read(String),

    /// Failed to write to the output stream.
    #[error("write error: {0}")]
    Write(String),

    /// The output writer task stopped unexpectedly.
    #[error("writer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
