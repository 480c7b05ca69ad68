//! Basic client usage example.
//!
//! Reads SLACK_BOT_TOKEN, SLACK_TEAM_ID (and optionally SLACK_CHANNEL_IDS)
//! from the environment, lists channels and a page of users.
//!
//! Run with: cargo run --example basic_usage

use slack_mcp_client::{ClientConfig, SlackClient, SlackResult};

#[tokio::main]
async fn main() -> SlackResult<()> {
    tracing_subscriber::fmt::init();

    let client = SlackClient::from_config(ClientConfig::from_env()?)?;

    println!("Listing channels...");
    let channels = client.conversations().list(20, None).await?;
    if channels["ok"] != true {
        println!("Slack returned an error: {}", channels["error"]);
        return Ok(());
    }
    for channel in channels["channels"].as_array().into_iter().flatten() {
        println!("  #{} ({})", channel["name"].as_str().unwrap_or("?"), channel["id"]);
    }

    println!("\nListing users...");
    let users = client.users().list(10, None).await?;
    for user in users["members"].as_array().into_iter().flatten() {
        println!("  {} ({})", user["name"].as_str().unwrap_or("?"), user["id"]);
    }

    Ok(())
}
