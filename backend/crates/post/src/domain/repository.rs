//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! Method names carry the aggregate so one store can implement both traits.

use kernel::id::{CommentId, TweetId};

use crate::domain::entity::{Comment, NewComment, NewTweet, Tweet};
use crate::domain::value_object::PostContent;
use crate::error::PostResult;

/// Tweet repository trait
#[trait_variant::make(TweetRepository: Send)]
pub trait LocalTweetRepository {
    /// Insert a tweet and return it with its id and author
    async fn create_tweet(&self, tweet: &NewTweet) -> PostResult<Tweet>;

    async fn find_tweet(&self, tweet_id: TweetId) -> PostResult<Option<Tweet>>;

    async fn tweet_exists(&self, tweet_id: TweetId) -> PostResult<bool>;

    /// All tweets, newest first (ties by id, descending)
    async fn list_tweets(&self) -> PostResult<Vec<Tweet>>;

    async fn update_tweet_content(&self, tweet_id: TweetId, content: &PostContent)
    -> PostResult<()>;

    /// Delete a tweet together with all of its comments
    ///
    /// Returns whether a row was deleted.
    async fn delete_tweet(&self, tweet_id: TweetId) -> PostResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Insert a comment and return it with its id and author
    async fn create_comment(&self, comment: &NewComment) -> PostResult<Comment>;

    async fn find_comment(&self, comment_id: CommentId) -> PostResult<Option<Comment>>;

    /// Every comment of a tweet, roots and replies alike, oldest first
    /// (ties by id, ascending)
    async fn list_comments(&self, tweet_id: TweetId) -> PostResult<Vec<Comment>>;

    /// Delete a comment together with its whole reply subtree
    ///
    /// Returns whether a row was deleted.
    async fn delete_comment(&self, comment_id: CommentId) -> PostResult<bool>;
}
