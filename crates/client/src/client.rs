//! Main client for the Slack Web API.

use crate::api::*;
use crate::config::{parse_base_url, parse_channel_ids, ClientConfig, DEFAULT_TIMEOUT};
use crate::error::{SlackError, SlackResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;

/// Main client for the Slack Web API methods the MCP tools need.
#[derive(Debug, Clone)]
pub struct SlackClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl SlackClient {
    /// Create a new client builder.
    pub fn builder() -> SlackClientBuilder {
        SlackClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> SlackResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the conversations API.
    pub fn conversations(&self) -> ConversationsApi<'_> {
        ConversationsApi::new(self)
    }

    /// Get the chat API.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    /// Get the reactions API.
    pub fn reactions(&self) -> ReactionsApi<'_> {
        ReactionsApi::new(self)
    }

    /// Get the users API.
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }
}

/// Builder for creating a SlackClient.
pub struct SlackClientBuilder {
    base_url: Option<String>,
    bot_token: Option<String>,
    team_id: Option<String>,
    channel_ids: Option<Vec<String>>,
    timeout: Duration,
}

impl SlackClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            bot_token: None,
            team_id: None,
            channel_ids: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the Slack Web API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bot token.
    pub fn bot_token(mut self, token: impl Into<String>) -> Self {
        self.bot_token = Some(token.into());
        self
    }

    /// Set the team ID list calls are scoped to.
    pub fn team_id(mut self, id: impl Into<String>) -> Self {
        self.team_id = Some(id.into());
        self
    }

    /// Restrict channel listing to a fixed set of channel IDs.
    pub fn channel_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        self.channel_ids = parse_channel_ids(&ids.join(","));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> SlackResult<SlackClient> {
        let bot_token = self
            .bot_token
            .ok_or_else(|| SlackError::Config("bot_token is required".to_string()))?;
        let team_id = self
            .team_id
            .ok_or_else(|| SlackError::Config("team_id is required".to_string()))?;

        let mut config = ClientConfig::new(bot_token, team_id)?;
        if let Some(base_url) = self.base_url {
            config.base_url = parse_base_url(&base_url)?;
        }
        config.channel_ids = self.channel_ids;
        config.timeout = self.timeout;

        SlackClient::from_config(config)
    }
}

impl Default for SlackClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_token() {
        let result = SlackClient::builder().team_id("T1").build();
        assert!(matches!(result, Err(SlackError::Config(_))));
    }

    #[test]
    fn test_builder_requires_team_id() {
        let result = SlackClient::builder().bot_token("xoxb-1").build();
        assert!(matches!(result, Err(SlackError::Config(_))));
    }

    #[test]
    fn test_builder_sets_fields() {
        let client = SlackClient::builder()
            .bot_token("xoxb-1")
            .team_id("T1")
            .base_url("http://localhost:3000")
            .channel_ids([" C1", "C2 ", ""])
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        let config = client.config();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.team_id, "T1");
        assert_eq!(
            config.channel_ids,
            Some(vec!["C1".to_string(), "C2".to_string()])
        );
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_builder_empty_allowlist_is_unset() {
        let client = SlackClient::builder()
            .bot_token("xoxb-1")
            .team_id("T1")
            .channel_ids(Vec::<String>::new())
            .build()
            .unwrap();

        assert!(!client.config().uses_channel_allowlist());
    }
}
