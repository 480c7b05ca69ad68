//! Users API endpoints.

use super::clamp_limit;
use crate::client::SlackClient;
use crate::error::SlackResult;
use serde::Serialize;
use serde_json::Value;

/// Users API for workspace members and profiles.
pub struct UsersApi<'a> {
    client: &'a SlackClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a SlackClient) -> Self {
        Self { client }
    }

    /// List users in the workspace.
    pub async fn list(&self, limit: u32, cursor: Option<&str>) -> SlackResult<Value> {
        let query = ListQuery {
            limit: clamp_limit(limit),
            team_id: &self.client.config().team_id,
            cursor: cursor.filter(|c| !c.is_empty()),
        };
        self.client.http.get("users.list", &query).await
    }

    /// Get a user's profile, including custom field labels.
    pub async fn profile(&self, user_id: &str) -> SlackResult<Value> {
        let query = ProfileQuery {
            user: user_id,
            include_labels: true,
        };
        self.client.http.get("users.profile.get", &query).await
    }
}

#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    limit: u32,
    team_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ProfileQuery<'a> {
    user: &'a str,
    include_labels: bool,
}
