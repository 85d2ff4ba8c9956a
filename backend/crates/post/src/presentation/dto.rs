//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, TweetId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::{Comment, Tweet};

// ============================================================================
// Tweets
// ============================================================================

/// Create or update a tweet
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TweetRequest {
    #[validate(
        custom(function = "kernel::validation::not_blank", message = "Content is required"),
        length(max = 280, message = "Content must be up to 280 characters")
    )]
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetResponse {
    pub id: TweetId,
    pub content: String,
    pub post_time: DateTime<Utc>,
    pub author_screen_name: String,
    pub author_id: UserId,
}

impl From<Tweet> for TweetResponse {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.tweet_id,
            content: tweet.content.into(),
            post_time: tweet.post_time,
            author_screen_name: tweet.author.screen_name,
            author_id: tweet.author.user_id,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

/// Root comment or reply
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(
        custom(function = "kernel::validation::not_blank", message = "Content is required"),
        length(max = 280, message = "Content must be up to 280 characters")
    )]
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub content: String,
    pub post_time: DateTime<Utc>,
    pub author_screen_name: String,
    pub tweet_id: TweetId,
    /// `null` for a root comment
    pub parent_comment_id: Option<CommentId>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id,
            content: comment.content.into(),
            post_time: comment.post_time,
            author_screen_name: comment.author.screen_name,
            tweet_id: comment.tweet_id,
            parent_comment_id: comment.parent_comment_id,
        }
    }
}
