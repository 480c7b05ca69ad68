//! Conversations API endpoints.

use super::clamp_limit;
use crate::client::SlackClient;
use crate::error::SlackResult;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Conversations API for channels, history and threads.
pub struct ConversationsApi<'a> {
    client: &'a SlackClient,
}

impl<'a> ConversationsApi<'a> {
    pub(crate) fn new(client: &'a SlackClient) -> Self {
        Self { client }
    }

    /// List public channels.
    ///
    /// With a channel allowlist configured this looks up each channel in
    /// turn, drops archived ones, and returns a response shaped like a
    /// single `conversations.list` page with an empty `next_cursor`.
    pub async fn list(&self, limit: u32, cursor: Option<&str>) -> SlackResult<Value> {
        if let Some(channel_ids) = &self.client.config().channel_ids {
            return self.list_allowlisted(channel_ids).await;
        }

        let query = ListQuery {
            types: "public_channel",
            exclude_archived: true,
            limit: clamp_limit(limit),
            team_id: &self.client.config().team_id,
            cursor: cursor.filter(|c| !c.is_empty()),
        };
        self.client.http.get("conversations.list", &query).await
    }

    async fn list_allowlisted(&self, channel_ids: &[String]) -> SlackResult<Value> {
        let mut channels = Vec::with_capacity(channel_ids.len());

        for channel_id in channel_ids {
            let response = self.info(channel_id).await?;
            match active_channel(response) {
                Some(channel) => channels.push(channel),
                None => debug!(channel_id = %channel_id, "skipping unavailable or archived channel"),
            }
        }

        Ok(json!({
            "ok": true,
            "channels": channels,
            "response_metadata": { "next_cursor": "" },
        }))
    }

    /// Get information about a single channel.
    pub async fn info(&self, channel_id: &str) -> SlackResult<Value> {
        self.client
            .http
            .get("conversations.info", &[("channel", channel_id)])
            .await
    }

    /// Get recent messages from a channel.
    pub async fn history(&self, channel_id: &str, limit: u32) -> SlackResult<Value> {
        let query = HistoryQuery {
            channel: channel_id,
            limit: clamp_limit(limit),
        };
        self.client.http.get("conversations.history", &query).await
    }

    /// Get all replies in a thread.
    pub async fn replies(&self, channel_id: &str, thread_ts: &str) -> SlackResult<Value> {
        self.client
            .http
            .get("conversations.replies", &[("channel", channel_id), ("ts", thread_ts)])
            .await
    }
}

/// Pull the channel object out of a `conversations.info` response if the
/// lookup succeeded and the channel is not archived.
fn active_channel(mut response: Value) -> Option<Value> {
    if response.get("ok").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    let channel = response.get_mut("channel")?.take();
    if !channel.is_object() {
        return None;
    }
    if channel.get("is_archived").and_then(Value::as_bool) == Some(true) {
        return None;
    }
    Some(channel)
}

#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    types: &'a str,
    exclude_archived: bool,
    limit: u32,
    team_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct HistoryQuery<'a> {
    channel: &'a str,
    limit: u32,
}
