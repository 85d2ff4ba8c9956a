//! In-memory Repository
//!
//! Tweet and comment arenas behind a `tokio::sync::RwLock`, joined against
//! a [`MemoryAuthRepository`] for author names. Deleting a user in the auth
//! store does not reach in here, so every call first drops rows whose
//! author, tweet or parent comment is gone. That gives the same cascade
//! behaviour as the foreign keys in the SQL schema.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use auth::{AuthError, MemoryAuthRepository};
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, TweetId, UserId};
use tokio::sync::{RwLock, RwLockWriteGuard};

use crate::domain::entity::{Author, Comment, NewComment, NewTweet, Tweet};
use crate::domain::repository::{CommentRepository, TweetRepository};
use crate::domain::value_object::PostContent;
use crate::error::{PostError, PostResult};

type ScreenNames = BTreeMap<UserId, String>;

struct TweetRecord {
    content: PostContent,
    post_time: DateTime<Utc>,
    user_id: UserId,
}

struct CommentRecord {
    content: PostContent,
    post_time: DateTime<Utc>,
    tweet_id: TweetId,
    user_id: UserId,
    parent_comment_id: Option<CommentId>,
}

#[derive(Default)]
struct PostTables {
    last_tweet_id: i64,
    last_comment_id: i64,
    tweets: BTreeMap<TweetId, TweetRecord>,
    comments: BTreeMap<CommentId, CommentRecord>,
}

impl PostTables {
    /// Drop rows that lost their author, tweet or parent
    fn drop_orphans(&mut self, users: &ScreenNames) {
        self.tweets.retain(|_, t| users.contains_key(&t.user_id));

        let tweets = &self.tweets;
        self.comments
            .retain(|_, c| users.contains_key(&c.user_id) && tweets.contains_key(&c.tweet_id));

        // A removed comment may orphan replies further down
        loop {
            let before = self.comments.len();
            let alive: BTreeSet<CommentId> = self.comments.keys().copied().collect();
            self.comments
                .retain(|_, c| c.parent_comment_id.is_none_or(|p| alive.contains(&p)));
            if self.comments.len() == before {
                break;
            }
        }
    }

    /// `root` and every comment below it
    fn subtree(&self, root: CommentId) -> BTreeSet<CommentId> {
        let mut found = BTreeSet::from([root]);
        let mut frontier = vec![root];
        while let Some(parent) = frontier.pop() {
            for (id, comment) in &self.comments {
                if comment.parent_comment_id == Some(parent) && found.insert(*id) {
                    frontier.push(*id);
                }
            }
        }
        found
    }

    fn tweet(&self, tweet_id: TweetId, users: &ScreenNames) -> Option<Tweet> {
        let record = self.tweets.get(&tweet_id)?;
        Some(Tweet {
            tweet_id,
            content: record.content.clone(),
            post_time: record.post_time,
            author: author(record.user_id, users)?,
        })
    }

    fn comment(&self, comment_id: CommentId, users: &ScreenNames) -> Option<Comment> {
        let record = self.comments.get(&comment_id)?;
        Some(Comment {
            comment_id,
            content: record.content.clone(),
            post_time: record.post_time,
            tweet_id: record.tweet_id,
            author: author(record.user_id, users)?,
            parent_comment_id: record.parent_comment_id,
        })
    }
}

fn author(user_id: UserId, users: &ScreenNames) -> Option<Author> {
    users.get(&user_id).map(|screen_name| Author {
        user_id,
        screen_name: screen_name.clone(),
    })
}

/// In-memory tweet and comment store
#[derive(Clone)]
pub struct MemoryPostRepository {
    tables: Arc<RwLock<PostTables>>,
    users: MemoryAuthRepository,
}

impl MemoryPostRepository {
    /// Store whose authors live in `users`
    pub fn new(users: MemoryAuthRepository) -> Self {
        Self {
            tables: Arc::new(RwLock::new(PostTables::default())),
            users,
        }
    }

    /// Current author names and the tables with orphans removed
    ///
    /// The auth lock is released before the post lock is taken.
    async fn synced(&self) -> (ScreenNames, RwLockWriteGuard<'_, PostTables>) {
        let users = self.users.screen_names().await;
        let mut tables = self.tables.write().await;
        tables.drop_orphans(&users);
        (users, tables)
    }
}

// ============================================================================
// Tweet Repository Implementation
// ============================================================================

impl TweetRepository for MemoryPostRepository {
    async fn create_tweet(&self, tweet: &NewTweet) -> PostResult<Tweet> {
        let (users, mut tables) = self.synced().await;
        if !users.contains_key(&tweet.user_id) {
            return Err(AuthError::AuthenticatedUserNotFound.into());
        }

        tables.last_tweet_id += 1;
        let tweet_id = TweetId::from_i64(tables.last_tweet_id);
        tables.tweets.insert(
            tweet_id,
            TweetRecord {
                content: tweet.content.clone(),
                post_time: tweet.post_time,
                user_id: tweet.user_id,
            },
        );

        tables
            .tweet(tweet_id, &users)
            .ok_or_else(|| PostError::Internal("Stored tweet has no author".to_string()))
    }

    async fn find_tweet(&self, tweet_id: TweetId) -> PostResult<Option<Tweet>> {
        let (users, tables) = self.synced().await;
        Ok(tables.tweet(tweet_id, &users))
    }

    async fn tweet_exists(&self, tweet_id: TweetId) -> PostResult<bool> {
        let (_, tables) = self.synced().await;
        Ok(tables.tweets.contains_key(&tweet_id))
    }

    async fn list_tweets(&self) -> PostResult<Vec<Tweet>> {
        let (users, tables) = self.synced().await;
        let mut tweets: Vec<Tweet> = tables
            .tweets
            .keys()
            .filter_map(|id| tables.tweet(*id, &users))
            .collect();
        tweets.sort_by(|a, b| {
            b.post_time
                .cmp(&a.post_time)
                .then(b.tweet_id.cmp(&a.tweet_id))
        });
        Ok(tweets)
    }

    async fn update_tweet_content(
        &self,
        tweet_id: TweetId,
        content: &PostContent,
    ) -> PostResult<()> {
        let (_, mut tables) = self.synced().await;
        if let Some(record) = tables.tweets.get_mut(&tweet_id) {
            record.content = content.clone();
        }
        Ok(())
    }

    async fn delete_tweet(&self, tweet_id: TweetId) -> PostResult<bool> {
        let (_, mut tables) = self.synced().await;
        let removed = tables.tweets.remove(&tweet_id).is_some();
        tables.comments.retain(|_, c| c.tweet_id != tweet_id);
        Ok(removed)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for MemoryPostRepository {
    async fn create_comment(&self, comment: &NewComment) -> PostResult<Comment> {
        let (users, mut tables) = self.synced().await;
        if !users.contains_key(&comment.user_id) {
            return Err(AuthError::AuthenticatedUserNotFound.into());
        }
        if !tables.tweets.contains_key(&comment.tweet_id) {
            return Err(PostError::TweetNotFound);
        }
        if let Some(parent) = comment.parent_comment_id {
            if !tables.comments.contains_key(&parent) {
                return Err(PostError::ParentCommentNotFound);
            }
        }

        tables.last_comment_id += 1;
        let comment_id = CommentId::from_i64(tables.last_comment_id);
        tables.comments.insert(
            comment_id,
            CommentRecord {
                content: comment.content.clone(),
                post_time: comment.post_time,
                tweet_id: comment.tweet_id,
                user_id: comment.user_id,
                parent_comment_id: comment.parent_comment_id,
            },
        );

        tables
            .comment(comment_id, &users)
            .ok_or_else(|| PostError::Internal("Stored comment has no author".to_string()))
    }

    async fn find_comment(&self, comment_id: CommentId) -> PostResult<Option<Comment>> {
        let (users, tables) = self.synced().await;
        Ok(tables.comment(comment_id, &users))
    }

    async fn list_comments(&self, tweet_id: TweetId) -> PostResult<Vec<Comment>> {
        let (users, tables) = self.synced().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|(_, c)| c.tweet_id == tweet_id)
            .filter_map(|(id, _)| tables.comment(*id, &users))
            .collect();
        comments.sort_by(|a, b| {
            a.post_time
                .cmp(&b.post_time)
                .then(a.comment_id.cmp(&b.comment_id))
        });
        Ok(comments)
    }

    async fn delete_comment(&self, comment_id: CommentId) -> PostResult<bool> {
        let (_, mut tables) = self.synced().await;
        if !tables.comments.contains_key(&comment_id) {
            return Ok(false);
        }

        let doomed = tables.subtree(comment_id);
        tables.comments.retain(|id, _| !doomed.contains(id));
        Ok(true)
    }
}
