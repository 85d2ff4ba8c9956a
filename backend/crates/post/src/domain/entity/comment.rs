//! Comment Entity
//!
//! Comments form a tree under a tweet: a root comment has no parent, a reply
//! points at its parent and always belongs to the parent's tweet.

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, TweetId, UserId};

use crate::domain::entity::Author;
use crate::domain::value_object::PostContent;

/// Persisted comment
///
/// Equality is by `comment_id` only.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub content: PostContent,
    pub post_time: DateTime<Utc>,
    pub tweet_id: TweetId,
    pub author: Author,
    /// `None` for a root comment
    pub parent_comment_id: Option<CommentId>,
}

impl Comment {
    #[inline]
    pub fn owner_id(&self) -> UserId {
        self.author.user_id
    }
}

impl PartialEq for Comment {
    fn eq(&self, other: &Self) -> bool {
        self.comment_id == other.comment_id
    }
}

impl Eq for Comment {}

/// A comment that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: PostContent,
    pub post_time: DateTime<Utc>,
    pub tweet_id: TweetId,
    pub user_id: UserId,
    pub parent_comment_id: Option<CommentId>,
}

impl NewComment {
    /// Comment directly under a tweet
    pub fn root(content: PostContent, tweet_id: TweetId, user_id: UserId) -> Self {
        Self {
            content,
            post_time: Utc::now(),
            tweet_id,
            user_id,
            parent_comment_id: None,
        }
    }

    /// Reply to `parent`, placed in the parent's tweet
    pub fn reply_to(content: PostContent, parent: &Comment, user_id: UserId) -> Self {
        Self {
            content,
            post_time: Utc::now(),
            tweet_id: parent.tweet_id,
            user_id,
            parent_comment_id: Some(parent.comment_id),
        }
    }
}
