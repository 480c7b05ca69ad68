//! Error types for the Slack client.

/// Result type for client operations.
pub type SlackResult<T> = Result<T, SlackError>;

/// Error types that can occur when talking to the Slack Web API.
///
/// Slack reports business failures (`"ok": false`) inside a normal JSON
/// body. Those are returned to the caller as data and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum SlackError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON.
    #[error("Invalid JSON response from {method} (status {status}): {source}")]
    Decode {
        method: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable is not set.
    #[error("Please set SLACK_BOT_TOKEN and SLACK_TEAM_ID environment variables ({0} is missing)")]
    MissingEnv(&'static str),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SlackError {
    /// Check if this error was raised by the request timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }
}
