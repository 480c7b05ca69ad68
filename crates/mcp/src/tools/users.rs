// User tools: workspace directory and profiles

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

const DEFAULT_USER_LIMIT: u32 = 100;

/// Tool to list workspace members
pub struct GetUsersTool {
    client: Arc<SlackClient>,
}

impl GetUsersTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetUsersArgs {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default, deserialize_with = "deserialize_limit")]
    limit: Option<u32>,
}

#[async_trait::async_trait]
impl Tool for GetUsersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_get_users".to_string(),
            description:
                "Get a list of all users in the workspace with their basic profile information"
                    .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "cursor": json_schema_string("Pagination cursor for next page of results"),
                    "limit": json_schema_integer(
                        "Maximum number of users to return (default 100, max 200)",
                        DEFAULT_USER_LIMIT,
                        Some(MAX_PAGE_LIMIT),
                    )
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: GetUsersArgs = parse_arguments(arguments)?;

        let response = self
            .client
            .users()
            .list(args.limit.unwrap_or(DEFAULT_USER_LIMIT), args.cursor.as_deref())
            .await?;
        Ok(response)
    }
}

/// Tool to fetch one user's full profile
pub struct GetUserProfileTool {
    client: Arc<SlackClient>,
}

impl GetUserProfileTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetUserProfileArgs {
    user_id: String,
}

#[async_trait::async_trait]
impl Tool for GetUserProfileTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_get_user_profile".to_string(),
            description: "Get detailed profile information for a specific user".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "user_id": json_schema_string("The ID of the user")
                }),
                vec!["user_id"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: GetUserProfileArgs = parse_arguments(arguments)?;

        let response = self.client.users().profile(&args.user_id).await?;
        Ok(response)
    }
}
