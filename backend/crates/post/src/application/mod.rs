//! Application Layer
//!
//! Tweet and comment services. Both re-load the caller through the `auth`
//! crate's user repository before acting on its behalf.

pub mod comment_service;
pub mod tweet_service;

// Re-exports
pub use comment_service::CommentService;
pub use tweet_service::TweetService;
