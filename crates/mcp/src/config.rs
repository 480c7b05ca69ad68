// Startup configuration: command-line flags backed by environment variables

use clap::Parser;
use slack_mcp_client::config::{
    ClientConfig, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_BOT_TOKEN, ENV_CHANNEL_IDS, ENV_TEAM_ID,
};
use slack_mcp_client::SlackResult;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[command(name = "slack-mcp", version)]
#[command(about = "Slack MCP Server - exposes Slack messaging tools to MCP hosts over stdio", long_about = None)]
pub struct Cli {
    /// Slack bot token (xoxb-...)
    #[arg(long, env = "SLACK_BOT_TOKEN", hide_env_values = true)]
    pub bot_token: Option<String>,

    /// Slack workspace (team) ID
    #[arg(long, env = "SLACK_TEAM_ID")]
    pub team_id: Option<String>,

    /// Comma-separated channel IDs; restricts channel listing to these
    #[arg(long, env = "SLACK_CHANNEL_IDS")]
    pub channel_ids: Option<String>,

    /// Slack Web API base URL
    #[arg(long, env = "SLACK_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "SLACK_MCP_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,
}

impl Cli {
    /// Resolve the Slack client configuration.
    ///
    /// Fails with [`slack_mcp_client::SlackError::MissingEnv`] when the token
    /// or team ID is absent.
    pub fn client_config(&self) -> SlackResult<ClientConfig> {
        let mut config = ClientConfig::from_lookup(|key| match key {
            ENV_BOT_TOKEN => self.bot_token.clone(),
            ENV_TEAM_ID => self.team_id.clone(),
            ENV_CHANNEL_IDS => self.channel_ids.clone(),
            ENV_BASE_URL => Some(self.api_base_url.clone()),
            _ => None,
        })?;
        config.timeout = Duration::from_secs(self.timeout_secs);
        Ok(config)
    }
}
