//! Comment Service
//!
//! Root comments, replies and subtree deletion.

use std::sync::Arc;

use auth::Caller;
use auth::application::authenticated_user;
use auth::domain::policy::ensure_can_delete;
use auth::domain::repository::UserRepository;
use kernel::id::{CommentId, TweetId};

use crate::domain::entity::{Comment, NewComment};
use crate::domain::repository::{CommentRepository, TweetRepository};
use crate::domain::value_object::PostContent;
use crate::error::{PostError, PostResult};

/// Comment service
pub struct CommentService<P, U>
where
    P: TweetRepository + CommentRepository,
    U: UserRepository,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> CommentService<P, U>
where
    P: TweetRepository + CommentRepository,
    U: UserRepository,
{
    pub fn new(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        Self {
            post_repo,
            user_repo,
        }
    }

    /// Flat list of a tweet's comments; replies carry their parent id
    pub async fn list_for_tweet(&self, tweet_id: TweetId) -> PostResult<Vec<Comment>> {
        if !self.post_repo.tweet_exists(tweet_id).await? {
            return Err(PostError::TweetNotFound);
        }
        self.post_repo.list_comments(tweet_id).await
    }

    pub async fn create_root(
        &self,
        caller: &Caller,
        tweet_id: TweetId,
        content: String,
    ) -> PostResult<Comment> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;
        let tweet = self
            .post_repo
            .find_tweet(tweet_id)
            .await?
            .ok_or(PostError::TweetNotFound)?;
        let content = PostContent::new(content)?;

        let comment = self
            .post_repo
            .create_comment(&NewComment::root(content, tweet.tweet_id, user.user_id))
            .await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            tweet_id = %comment.tweet_id,
            user_id = %user.user_id,
            "Comment created"
        );
        Ok(comment)
    }

    /// Reply to a comment; the reply joins the parent's tweet
    pub async fn reply(
        &self,
        caller: &Caller,
        parent_comment_id: CommentId,
        content: String,
    ) -> PostResult<Comment> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;
        let parent = self
            .post_repo
            .find_comment(parent_comment_id)
            .await?
            .ok_or(PostError::ParentCommentNotFound)?;
        let content = PostContent::new(content)?;

        let reply = self
            .post_repo
            .create_comment(&NewComment::reply_to(content, &parent, user.user_id))
            .await?;

        tracing::info!(
            comment_id = %reply.comment_id,
            parent_comment_id = %parent.comment_id,
            user_id = %user.user_id,
            "Reply created"
        );
        Ok(reply)
    }

    /// Delete a comment and its replies (author or ADMIN)
    pub async fn delete(&self, caller: &Caller, comment_id: CommentId) -> PostResult<()> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;
        let comment = self
            .post_repo
            .find_comment(comment_id)
            .await?
            .ok_or(PostError::CommentNotFound)?;

        ensure_can_delete(&user, comment.owner_id(), PostError::CommentDeleteDenied)?;

        if !self.post_repo.delete_comment(comment.comment_id).await? {
            return Err(PostError::CommentNotFound);
        }

        tracing::info!(
            comment_id = %comment.comment_id,
            user_id = %user.user_id,
            "Comment deleted"
        );
        Ok(())
    }
}
