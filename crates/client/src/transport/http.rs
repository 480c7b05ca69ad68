//! HTTP transport layer for the Slack client.

use crate::config::ClientConfig;
use crate::error::{SlackError, SlackResult};
use reqwest::{header, Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for calling Slack Web API methods.
///
/// Holds the one shared `reqwest::Client` for the process; the credential
/// lives in its default headers.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SlackResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.bot_token))
            .map_err(|_| SlackError::Config("Invalid bot token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(concat!("slack-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Build the URL for a Web API method such as `conversations.list`.
    fn build_url(&self, api_method: &str) -> SlackResult<url::Url> {
        self.config
            .base_url
            .join(api_method)
            .map_err(SlackError::InvalidUrl)
    }

    /// Send a request and decode whatever JSON body comes back.
    ///
    /// The HTTP status is not inspected: Slack reports failures in the body.
    async fn execute(&self, api_method: &str, request: RequestBuilder) -> SlackResult<Value> {
        let response = request.send().await.map_err(|e| {
            let err = SlackError::from(e);
            if err.is_timeout() {
                warn!(api_method, timeout = ?self.config.timeout, "Slack API request timed out");
            }
            err
        })?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(api_method, status, bytes = text.len(), "Slack API response");

        serde_json::from_str(&text).map_err(|source| SlackError::Decode {
            method: api_method.to_string(),
            status,
            source,
        })
    }

    /// Execute a GET request with query parameters.
    pub async fn get<Q: Serialize + ?Sized>(&self, api_method: &str, query: &Q) -> SlackResult<Value> {
        let url = self.build_url(api_method)?;
        debug!(url = %url, "GET request");

        self.execute(api_method, self.client.get(url).query(query))
            .await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, api_method: &str, body: &B) -> SlackResult<Value> {
        let url = self.build_url(api_method)?;
        debug!(url = %url, "POST request");

        self.execute(api_method, self.client.post(url).json(body))
            .await
    }
}
