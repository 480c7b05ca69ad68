//! Chat API endpoints.

use crate::client::SlackClient;
use crate::error::SlackResult;
use serde::Serialize;
use serde_json::Value;

/// Chat API for posting messages.
pub struct ChatApi<'a> {
    client: &'a SlackClient,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(client: &'a SlackClient) -> Self {
        Self { client }
    }

    /// Post a new message to a channel.
    pub async fn post_message(&self, channel_id: &str, text: &str) -> SlackResult<Value> {
        let body = PostMessageRequest {
            channel: channel_id,
            thread_ts: None,
            text,
        };
        self.client.http.post("chat.postMessage", &body).await
    }

    /// Reply to a thread, identified by its parent message timestamp.
    pub async fn post_reply(&self, channel_id: &str, thread_ts: &str, text: &str) -> SlackResult<Value> {
        let body = PostMessageRequest {
            channel: channel_id,
            thread_ts: Some(thread_ts),
            text,
        };
        self.client.http.post("chat.postMessage", &body).await
    }
}

#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
    text: &'a str,
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_message_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_json(json!({"channel": "C1", "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "channel": "C1",
                "ts": "1503435956.000247"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.chat().post_message("C1", "hello").await.unwrap();

        assert_eq!(result["ts"], "1503435956.000247");
    }

    #[tokio::test]
    async fn test_post_reply_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_json(json!({
                "channel": "C1",
                "thread_ts": "1503435956.000247",
                "text": "reply"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .chat()
            .post_reply("C1", "1503435956.000247", "reply")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_post_message_remote_failure_is_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": false,
                "error": "not_in_channel"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.chat().post_message("C9", "hello").await.unwrap();

        assert_eq!(result, json!({"ok": false, "error": "not_in_channel"}));
    }
}
