//! Configuration types for the Slack client.

use crate::error::{SlackError, SlackResult};
use std::time::Duration;
use url::Url;

/// Default Slack Web API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
pub const ENV_TEAM_ID: &str = "SLACK_TEAM_ID";
pub const ENV_CHANNEL_IDS: &str = "SLACK_CHANNEL_IDS";
pub const ENV_BASE_URL: &str = "SLACK_API_BASE_URL";

/// Configuration for the Slack client.
///
/// Resolved once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Slack Web API. Method names are joined onto it.
    pub base_url: Url,
    /// Bot token sent as a bearer credential.
    pub bot_token: String,
    /// Workspace the list calls are scoped to.
    pub team_id: String,
    /// Fixed channel allowlist. When set, channel listing looks up each id
    /// instead of paging through `conversations.list`.
    pub channel_ids: Option<Vec<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration against the public Slack API.
    pub fn new(bot_token: impl Into<String>, team_id: impl Into<String>) -> SlackResult<Self> {
        Ok(Self {
            base_url: Url::parse(DEFAULT_BASE_URL)?,
            bot_token: bot_token.into(),
            team_id: team_id.into(),
            channel_ids: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> SlackResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> SlackResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bot_token = get(ENV_BOT_TOKEN).ok_or(SlackError::MissingEnv(ENV_BOT_TOKEN))?;
        let team_id = get(ENV_TEAM_ID).ok_or(SlackError::MissingEnv(ENV_TEAM_ID))?;

        let mut config = Self::new(bot_token, team_id)?;
        config.channel_ids = get(ENV_CHANNEL_IDS).and_then(|raw| parse_channel_ids(&raw));
        if let Some(base_url) = get(ENV_BASE_URL) {
            config.base_url = parse_base_url(&base_url)?;
        }

        Ok(config)
    }

    /// Whether channel listing runs against the fixed allowlist.
    pub fn uses_channel_allowlist(&self) -> bool {
        self.channel_ids.is_some()
    }
}

/// Split a comma-separated channel list, trimming whitespace and dropping
/// empty entries. Returns `None` when nothing is left.
pub fn parse_channel_ids(raw: &str) -> Option<Vec<String>> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        None
    } else {
        Some(ids)
    }
}

/// Parse a base URL, forcing a trailing slash so method names join under it.
pub fn parse_base_url(raw: &str) -> SlackResult<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    let url = Url::parse(&raw)?;
    if url.cannot_be_a_base() {
        return Err(SlackError::Config(format!("{raw} cannot be used as a base URL")));
    }
    Ok(url)
}
