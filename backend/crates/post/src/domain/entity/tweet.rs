//! Tweet Entity

use chrono::{DateTime, Utc};
use kernel::id::{TweetId, UserId};

use crate::domain::value_object::PostContent;

/// Owner of a tweet or comment, as shown next to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub user_id: UserId,
    pub screen_name: String,
}

/// Persisted tweet
///
/// Equality is by `tweet_id` only.
#[derive(Debug, Clone)]
pub struct Tweet {
    pub tweet_id: TweetId,
    pub content: PostContent,
    /// Assigned by the server on creation, never changed
    pub post_time: DateTime<Utc>,
    pub author: Author,
}

impl Tweet {
    #[inline]
    pub fn owner_id(&self) -> UserId {
        self.author.user_id
    }

    pub fn set_content(&mut self, content: PostContent) {
        self.content = content;
    }
}

impl PartialEq for Tweet {
    fn eq(&self, other: &Self) -> bool {
        self.tweet_id == other.tweet_id
    }
}

impl Eq for Tweet {}

/// A tweet that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewTweet {
    pub content: PostContent,
    pub post_time: DateTime<Utc>,
    pub user_id: UserId,
}
