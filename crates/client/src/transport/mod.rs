//! Transport layer for the Slack client.

pub mod http;

pub use http::HttpTransport;
