// Channel tools: listing and message history

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{
    deserialize_limit, json_schema_integer, json_schema_object, json_schema_string,
    parse_arguments, Tool,
};
use serde::Deserialize;
use serde_json::Value;
use slack_mcp_client::{SlackClient, MAX_PAGE_LIMIT};
use std::sync::Arc;

const DEFAULT_CHANNEL_LIMIT: u32 = 100;
const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Tool to list public (or allowlisted) channels
pub struct ListChannelsTool {
    client: Arc<SlackClient>,
}

impl ListChannelsTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ListChannelsArgs {
    #[serde(default, deserialize_with = "deserialize_limit")]
    limit: Option<u32>,
    #[serde(default)]
    cursor: Option<String>,
}

#[async_trait::async_trait]
impl Tool for ListChannelsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_list_channels".to_string(),
            description: "List public or pre-defined channels in the workspace with pagination"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_integer(
                        "Maximum number of channels to return (default 100, max 200)",
                        DEFAULT_CHANNEL_LIMIT,
                        Some(MAX_PAGE_LIMIT),
                    ),
                    "cursor": json_schema_string("Pagination cursor for next page of results")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ListChannelsArgs = parse_arguments(arguments)?;

        let response = self
            .client
            .conversations()
            .list(
                args.limit.unwrap_or(DEFAULT_CHANNEL_LIMIT),
                args.cursor.as_deref(),
            )
            .await?;
        Ok(response)
    }
}

/// Tool to fetch recent messages from a channel
pub struct GetChannelHistoryTool {
    client: Arc<SlackClient>,
}

impl GetChannelHistoryTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetChannelHistoryArgs {
    channel_id: String,
    #[serde(default, deserialize_with = "deserialize_limit")]
    limit: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for GetChannelHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_get_channel_history".to_string(),
            description: "Get recent messages from a channel".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel_id": json_schema_string("The ID of the channel"),
                    "limit": json_schema_integer(
                        "Number of messages to retrieve (default 10)",
                        DEFAULT_HISTORY_LIMIT,
                        Some(MAX_PAGE_LIMIT),
                    )
                }),
                vec!["channel_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: GetChannelHistoryArgs = parse_arguments(arguments)?;

        let response = self
            .client
            .conversations()
            .history(&args.channel_id, args.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
            .await?;
        Ok(response)
    }
}
