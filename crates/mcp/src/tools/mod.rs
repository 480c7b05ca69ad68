pub mod channels;
pub mod messages;
pub mod users;
mod registry;

pub use channels::{GetChannelHistoryTool, ListChannelsTool};
pub use messages::{AddReactionTool, GetThreadRepliesTool, PostMessageTool, ReplyToThreadTool};
pub use registry::{
    deserialize_limit, json_schema_integer, json_schema_object, json_schema_string,
    parse_arguments, Tool, ToolRegistry,
};
pub use users::{GetUserProfileTool, GetUsersTool};

use crate::error::ToolError;
use slack_mcp_client::SlackClient;
use std::sync::Arc;

/// Build the registry of every Slack tool, all sharing one client.
pub fn slack_tools(client: Arc<SlackClient>) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(ListChannelsTool::new(client.clone())))?;
    registry.register(Arc::new(PostMessageTool::new(client.clone())))?;
    registry.register(Arc::new(ReplyToThreadTool::new(client.clone())))?;
    registry.register(Arc::new(AddReactionTool::new(client.clone())))?;
    registry.register(Arc::new(GetChannelHistoryTool::new(client.clone())))?;
    registry.register(Arc::new(GetThreadRepliesTool::new(client.clone())))?;
    registry.register(Arc::new(GetUsersTool::new(client.clone())))?;
    registry.register(Arc::new(GetUserProfileTool::new(client)))?;

    Ok(registry)
}

#[cfg(test)]
pub(crate) mod test_support {
    use slack_mcp_client::SlackClient;
    use std::sync::Arc;
    use wiremock::MockServer;

    pub fn client_for(server: &MockServer) -> Arc<SlackClient> {
        Arc::new(
            SlackClient::builder()
                .bot_token("xoxb-test")
                .team_id("T123")
                .base_url(server.uri())
                .build()
                .unwrap(),
        )
    }

    /// Client pointed at a closed port, for tests that must not reach Slack.
    pub fn offline_client() -> Arc<SlackClient> {
        Arc::new(
            SlackClient::builder()
                .bot_token("xoxb-test")
                .team_id("T123")
                .base_url("http://127.0.0.1:9")
                .build()
                .unwrap(),
        )
    }
}
