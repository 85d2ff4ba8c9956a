//! Tweet Service

use std::sync::Arc;

use auth::Caller;
use auth::application::authenticated_user;
use auth::domain::policy::{ensure_can_delete, ensure_can_modify};
use auth::domain::repository::UserRepository;
use chrono::Utc;
use kernel::id::TweetId;

use crate::domain::entity::{NewTweet, Tweet};
use crate::domain::repository::TweetRepository;
use crate::domain::value_object::PostContent;
use crate::error::{PostError, PostResult};

/// Tweet service
pub struct TweetService<P, U>
where
    P: TweetRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> TweetService<P, U>
where
    P: TweetRepository,
    U: UserRepository,
{
    pub fn new(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self {
            post_repo,
            user_repo,
        }
    }

    pub async fn list(&self) -> PostResult<Vec<Tweet>> {
        self.post_repo.list_tweets().await
    }

    pub async fn get(&self, tweet_id: TweetId) -> PostResult<Tweet> {
        self.post_repo
            .find_tweet(tweet_id)
            .await?
            .ok_or(PostError::TweetNotFound)
    }

    pub async fn create(&self, caller: &Caller, content: String) -> PostResult<Tweet> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;
        let content = PostContent::new(content)?;

        let tweet = self
            .post_repo
            .create_tweet(&NewTweet {
                content,
                post_time: Utc::now(),
                user_id: user.user_id,
            })
            .await?;

        tracing::info!(tweet_id = %tweet.tweet_id, user_id = %user.user_id, "Tweet created");
        Ok(tweet)
    }

    /// Replace the content of the caller's own tweet
    pub async fn update(
        &self,
        caller: &Caller,
        tweet_id: TweetId,
        content: String,
    ) -> PostResult<Tweet> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;
        let mut tweet = self.get(tweet_id).await?;

        ensure_can_modify(&user, tweet.owner_id(), PostError::TweetUpdateDenied)?;

        let content = PostContent::new(content)?;
        self.post_repo
            .update_tweet_content(tweet.tweet_id, &content)
            .await?;
        tweet.set_content(content);

        tracing::info!(tweet_id = %tweet.tweet_id, user_id = %user.user_id, "Tweet updated");
        Ok(tweet)
    }

    /// Delete a tweet with all of its comments (owner or ADMIN)
    pub async fn delete(&self, caller: &Caller, tweet_id: TweetId) -> PostResult<()> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;
        let tweet = self.get(tweet_id).await?;

        ensure_can_delete(&user, tweet.owner_id(), PostError::TweetDeleteDenied)?;

        if !self.post_repo.delete_tweet(tweet.tweet_id).await? {
            return Err(PostError::TweetNotFound);
        }

        tracing::info!(
            tweet_id = %tweet.tweet_id,
            user_id = %user.user_id,
            as_admin = user.user_id != tweet.owner_id(),
            "Tweet deleted"
        );
        Ok(())
    }
}
