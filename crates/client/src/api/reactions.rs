//! Reactions API endpoints.

use crate::client::SlackClient;
use crate::error::SlackResult;
use serde::Serialize;
use serde_json::Value;

/// Reactions API for emoji reactions on messages.
pub struct ReactionsApi<'a> {
    client: &'a SlackClient,
}

impl<'a> ReactionsApi<'a> {
    pub(crate) fn new(client: &'a SlackClient) -> Self {
        Self { client }
    }

    /// Add an emoji reaction to a message.
    pub async fn add(&self, channel_id: &str, timestamp: &str, name: &str) -> SlackResult<Value> {
        let body = AddReactionRequest {
            channel: channel_id,
            timestamp,
            name,
        };
        self.client.http.post("reactions.add", &body).await
    }
}

#[derive(Debug, Serialize)]
struct AddReactionRequest<'a> {
    channel: &'a str,
    timestamp: &'a str,
    name: &'a str,
}
