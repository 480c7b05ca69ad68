// Standalone Slack MCP server binary

use anyhow::{Context, Result};
use clap::Parser;
use slack_mcp::config::Cli;
use slack_mcp::tools::slack_tools;
use slack_mcp::{McpHandler, McpServer};
use slack_mcp_client::SlackClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Slack MCP Server...");
    if let Some(ids) = &config.channel_ids {
        tracing::info!(channels = ids.len(), "Channel listing restricted to SLACK_CHANNEL_IDS");
    }

    let client = Arc::new(SlackClient::from_config(config).context("Failed to create Slack client")?);

    let registry = slack_tools(client.clone()).context("Failed to register tools")?;
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(McpHandler::new(registry));
    let outcome = server.serve_stdio().await;

    // Release the shared HTTP client once the loop has ended
    drop(server);
    drop(client);
    tracing::info!("Slack MCP Server stopped");

    outcome.context("MCP transport failed")
}
