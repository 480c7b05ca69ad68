//! Slack Web API method families.
//!
//! Every method returns the decoded response body as-is, including Slack's
//! own `ok` and `error` fields.

pub mod chat;
pub mod conversations;
pub mod reactions;
pub mod users;

pub use chat::ChatApi;
pub use conversations::ConversationsApi;
pub use reactions::ReactionsApi;
pub use users::UsersApi;

/// Upper bound Slack accepts for paginated `limit` parameters.
pub const MAX_PAGE_LIMIT: u32 = 200;

/// Clamp a requested page size to [`MAX_PAGE_LIMIT`].
pub fn clamp_limit(limit: u32) -> u32 {
    limit.min(MAX_PAGE_LIMIT)
}
