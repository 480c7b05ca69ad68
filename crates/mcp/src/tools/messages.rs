// Message tools: posting, threads and reactions

use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_object, json_schema_string, parse_arguments, Tool};
use serde::Deserialize;
use serde_json::Value;
use slack_mcp_client::SlackClient;
use std::sync::Arc;

/// Pattern of a Slack message timestamp, e.g. `1234567890.123456`.
const MESSAGE_TS_PATTERN: &str = r"^\d+\.\d+$";

const THREAD_TS_DESCRIPTION: &str =
    "The timestamp of the parent message in the format '1234567890.123456'";

fn is_message_ts(value: &str) -> bool {
    match value.split_once('.') {
        Some((secs, micros)) => {
            !secs.is_empty()
                && !micros.is_empty()
                && secs.bytes().all(|b| b.is_ascii_digit())
                && micros.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn check_thread_ts(thread_ts: &str) -> Result<(), ToolError> {
    if is_message_ts(thread_ts) {
        Ok(())
    } else {
        Err(ToolError::InvalidArguments(format!(
            "thread_ts must look like '1234567890.123456', got '{thread_ts}'"
        )))
    }
}

fn thread_ts_schema() -> Value {
    let mut schema = json_schema_string(THREAD_TS_DESCRIPTION);
    schema["pattern"] = MESSAGE_TS_PATTERN.into();
    schema
}

/// Tool to post a new message to a channel
pub struct PostMessageTool {
    client: Arc<SlackClient>,
}

impl PostMessageTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PostMessageArgs {
    channel_id: String,
    text: String,
}

#[async_trait::async_trait]
impl Tool for PostMessageTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_post_message".to_string(),
            description: "Post a new message to a Slack channel".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel_id": json_schema_string("The ID of the channel to post to"),
                    "text": json_schema_string("The message text to post")
                }),
                vec!["channel_id", "text"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: PostMessageArgs = parse_arguments(arguments)?;

        let response = self
            .client
            .chat()
            .post_message(&args.channel_id, &args.text)
            .await?;
        Ok(response)
    }
}

/// Tool to reply inside an existing thread
pub struct ReplyToThreadTool {
    client: Arc<SlackClient>,
}

impl ReplyToThreadTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReplyToThreadArgs {
    channel_id: String,
    thread_ts: String,
    text: String,
}

#[async_trait::async_trait]
impl Tool for ReplyToThreadTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_reply_to_thread".to_string(),
            description: "Reply to a specific message thread in Slack".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel_id": json_schema_string("The ID of the channel containing the thread"),
                    "thread_ts": thread_ts_schema(),
                    "text": json_schema_string("The reply text")
                }),
                vec!["channel_id", "thread_ts", "text"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ReplyToThreadArgs = parse_arguments(arguments)?;
        check_thread_ts(&args.thread_ts)?;

        let response = self
            .client
            .chat()
            .post_reply(&args.channel_id, &args.thread_ts, &args.text)
            .await?;
        Ok(response)
    }
}

/// Tool to add an emoji reaction to a message
pub struct AddReactionTool {
    client: Arc<SlackClient>,
}

impl AddReactionTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddReactionArgs {
    channel_id: String,
    timestamp: String,
    reaction: String,
}

#[async_trait::async_trait]
impl Tool for AddReactionTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_add_reaction".to_string(),
            description: "Add a reaction emoji to a message".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel_id": json_schema_string("The ID of the channel containing the message"),
                    "timestamp": json_schema_string("The timestamp of the message to react to"),
                    "reaction": json_schema_string("The name of the emoji reaction (without ::)")
                }),
                vec!["channel_id", "timestamp", "reaction"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: AddReactionArgs = parse_arguments(arguments)?;

        // Slack wants the bare emoji name, `thumbsup` rather than `:thumbsup:`.
        let name = args.reaction.trim().trim_matches(':');
        if name.is_empty() {
            return Err(ToolError::InvalidArguments(
                "reaction must name an emoji".to_string(),
            ));
        }

        let response = self
            .client
            .reactions()
            .add(&args.channel_id, &args.timestamp, name)
            .await?;
        Ok(response)
    }
}

/// Tool to read every reply in a thread
pub struct GetThreadRepliesTool {
    client: Arc<SlackClient>,
}

impl GetThreadRepliesTool {
    pub fn new(client: Arc<SlackClient>) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GetThreadRepliesArgs {
    channel_id: String,
    thread_ts: String,
}

#[async_trait::async_trait]
impl Tool for GetThreadRepliesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "slack_get_thread_replies".to_string(),
            description: "Get all replies in a message thread".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "channel_id": json_schema_string("The ID of the channel containing the thread"),
                    "thread_ts": thread_ts_schema()
                }),
                vec!["channel_id", "thread_ts"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: GetThreadRepliesArgs = parse_arguments(arguments)?;
        check_thread_ts(&args.thread_ts)?;

        let response = self
            .client
            .conversations()
            .replies(&args.channel_id, &args.thread_ts)
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{client_for, offline_client};
    use serde_json::json;
    use wiremock::matchers::{any, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_message_ts() {
        assert!(is_message_ts("1234567890.123456"));
        assert!(is_message_ts("1.2"));
        assert!(!is_message_ts("1234567890"));
        assert!(!is_message_ts("1234567890."));
        assert!(!is_message_ts(".123456"));
        assert!(!is_message_ts("abc.def"));
        assert!(!is_message_ts("1.2.3"));
    }

    #[tokio::test]
    async fn test_post_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_json(json!({"channel": "C1", "text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "ts": "1.1"})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = PostMessageTool::new(client_for(&server));
        let result = tool
            .execute(json!({"channel_id": "C1", "text": "hello"}))
            .await
            .unwrap();
        assert_eq!(result["ts"], "1.1");
    }

    #[tokio::test]
    async fn test_post_message_missing_text_makes_no_call() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tool = PostMessageTool::new(client_for(&server));
        let err = tool.execute(json!({"channel_id": "C1"})).await.unwrap_err();

        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("`text`"));
    }

    #[tokio::test]
    async fn test_reply_to_thread() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .and(body_json(json!({
                "channel": "C1",
                "thread_ts": "1234567890.123456",
                "text": "on it"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = ReplyToThreadTool::new(client_for(&server));
        tool.execute(json!({
            "channel_id": "C1",
            "thread_ts": "1234567890.123456",
            "text": "on it"
        }))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_reply_rejects_malformed_thread_ts() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let tool = ReplyToThreadTool::new(client_for(&server));
        let err = tool
            .execute(json!({"channel_id": "C1", "thread_ts": "yesterday", "text": "hi"}))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("thread_ts"));
    }

    #[tokio::test]
    async fn test_add_reaction_strips_colons() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/reactions.add"))
            .and(body_json(json!({
                "channel": "C1",
                "timestamp": "1.2",
                "name": "thumbsup"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = AddReactionTool::new(client_for(&server));
        tool.execute(json!({"channel_id": "C1", "timestamp": "1.2", "reaction": ":thumbsup:"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_reaction_rejects_empty_name() {
        let tool = AddReactionTool::new(offline_client());

        let err = tool
            .execute(json!({"channel_id": "C1", "timestamp": "1.2", "reaction": "::"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_get_thread_replies() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/conversations.replies"))
            .and(query_param("channel", "C1"))
            .and(query_param("ts", "1234567890.123456"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "messages": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetThreadRepliesTool::new(client_for(&server));
        tool.execute(json!({"channel_id": "C1", "thread_ts": "1234567890.123456"}))
            .await
            .unwrap();
    }

    #[test]
    fn test_thread_ts_schema_has_pattern() {
        let schema = GetThreadRepliesTool::new(offline_client()).schema();

        assert_eq!(
            schema.input_schema["properties"]["thread_ts"]["pattern"],
            MESSAGE_TS_PATTERN
        );
        assert_eq!(schema.input_schema["required"], json!(["channel_id", "thread_ts"]));
    }
}
