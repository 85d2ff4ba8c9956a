//! Domain Layer
//!
//! Tweets, comments, content rules and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Author, Comment, NewComment, NewTweet, Tweet};
pub use repository::{CommentRepository, TweetRepository};
