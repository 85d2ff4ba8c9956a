//! PostgreSQL Repository Implementations
//!
//! Authors are joined from `users` on every read. Comment subtrees and a
//! tweet's comments are removed by `ON DELETE CASCADE`.

use auth::AuthError;
use chrono::{DateTime, Utc};
use kernel::error::conversions::foreign_key_violation;
use kernel::id::{CommentId, TweetId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{Author, Comment, NewComment, NewTweet, Tweet};
use crate::domain::repository::{CommentRepository, TweetRepository};
use crate::domain::value_object::PostContent;
use crate::error::{PostError, PostResult};

/// PostgreSQL-backed tweet and comment repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Insert failures caused by a referenced row deleted after the service checked it
fn map_insert_error(err: sqlx::Error) -> PostError {
    match foreign_key_violation(&err) {
        Some(constraint) => missing_reference(constraint),
        None => PostError::Database(err),
    }
}

fn missing_reference(constraint: &str) -> PostError {
    match constraint {
        "comments_tweet_id_fkey" => PostError::TweetNotFound,
        "comments_parent_comment_id_fkey" => PostError::ParentCommentNotFound,
        _ => AuthError::AuthenticatedUserNotFound.into(),
    }
}

// ============================================================================
// Tweet Repository Implementation
// ============================================================================

const TWEET_SELECT: &str = r#"
    SELECT
        t.tweet_id,
        t.content,
        t.post_time,
        t.user_id,
        u.screen_name
    FROM tweets t
    JOIN users u ON u.user_id = t.user_id
"#;

impl TweetRepository for PgPostRepository {
    async fn create_tweet(&self, tweet: &NewTweet) -> PostResult<Tweet> {
        let row = sqlx::query_as::<_, TweetRow>(
            r#"
            WITH inserted AS (
                INSERT INTO tweets (content, post_time, user_id)
                VALUES ($1, $2, $3)
                RETURNING tweet_id, content, post_time, user_id
            )
            SELECT
                i.tweet_id,
                i.content,
                i.post_time,
                i.user_id,
                u.screen_name
            FROM inserted i
            JOIN users u ON u.user_id = i.user_id
            "#,
        )
        .bind(tweet.content.as_str())
        .bind(tweet.post_time)
        .bind(tweet.user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn find_tweet(&self, tweet_id: TweetId) -> PostResult<Option<Tweet>> {
        let sql = format!("{TWEET_SELECT} WHERE t.tweet_id = $1");
        let row = sqlx::query_as::<_, TweetRow>(&sql)
            .bind(tweet_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Tweet::from))
    }

    async fn tweet_exists(&self, tweet_id: TweetId) -> PostResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tweets WHERE tweet_id = $1)")
                .bind(tweet_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn list_tweets(&self) -> PostResult<Vec<Tweet>> {
        let sql = format!("{TWEET_SELECT} ORDER BY t.post_time DESC, t.tweet_id DESC");
        let rows = sqlx::query_as::<_, TweetRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Tweet::from).collect())
    }

    async fn update_tweet_content(
        &self,
        tweet_id: TweetId,
        content: &PostContent,
    ) -> PostResult<()> {
        sqlx::query("UPDATE tweets SET content = $2 WHERE tweet_id = $1")
            .bind(tweet_id.as_i64())
            .bind(content.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_tweet(&self, tweet_id: TweetId) -> PostResult<bool> {
        let deleted = sqlx::query("DELETE FROM tweets WHERE tweet_id = $1")
            .bind(tweet_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

const COMMENT_SELECT: &str = r#"
    SELECT
        c.comment_id,
        c.content,
        c.post_time,
        c.tweet_id,
        c.user_id,
        c.parent_comment_id,
        u.screen_name
    FROM comments c
    JOIN users u ON u.user_id = c.user_id
"#;

impl CommentRepository for PgPostRepository {
    async fn create_comment(&self, comment: &NewComment) -> PostResult<Comment> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (content, post_time, tweet_id, user_id, parent_comment_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING comment_id, content, post_time, tweet_id, user_id, parent_comment_id
            )
            SELECT
                i.comment_id,
                i.content,
                i.post_time,
                i.tweet_id,
                i.user_id,
                i.parent_comment_id,
                u.screen_name
            FROM inserted i
            JOIN users u ON u.user_id = i.user_id
            "#,
        )
        .bind(comment.content.as_str())
        .bind(comment.post_time)
        .bind(comment.tweet_id.as_i64())
        .bind(comment.user_id.as_i64())
        .bind(comment.parent_comment_id.map(|id| id.as_i64()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn find_comment(&self, comment_id: CommentId) -> PostResult<Option<Comment>> {
        let sql = format!("{COMMENT_SELECT} WHERE c.comment_id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Comment::from))
    }

    async fn list_comments(&self, tweet_id: TweetId) -> PostResult<Vec<Comment>> {
        let sql =
            format!("{COMMENT_SELECT} WHERE c.tweet_id = $1 ORDER BY c.post_time, c.comment_id");
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(tweet_id.as_i64())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn delete_comment(&self, comment_id: CommentId) -> PostResult<bool> {
        let deleted = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct TweetRow {
    tweet_id: i64,
    content: String,
    post_time: DateTime<Utc>,
    user_id: i64,
    screen_name: String,
}

impl From<TweetRow> for Tweet {
    fn from(row: TweetRow) -> Self {
        Tweet {
            tweet_id: TweetId::from_i64(row.tweet_id),
            content: PostContent::from_db(row.content),
            post_time: row.post_time,
            author: Author {
                user_id: UserId::from_i64(row.user_id),
                screen_name: row.screen_name,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: i64,
    content: String,
    post_time: DateTime<Utc>,
    tweet_id: i64,
    user_id: i64,
    parent_comment_id: Option<i64>,
    screen_name: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            comment_id: CommentId::from_i64(row.comment_id),
            content: PostContent::from_db(row.content),
            post_time: row.post_time,
            tweet_id: TweetId::from_i64(row.tweet_id),
            author: Author {
                user_id: UserId::from_i64(row.user_id),
                screen_name: row.screen_name,
            },
            parent_comment_id: row.parent_comment_id.map(CommentId::from_i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference() {
        assert!(matches!(missing_reference("comments_tweet_id_fkey"), PostError::TweetNotFound));
        assert!(matches!(
            missing_reference("comments_parent_comment_id_fkey"),
            PostError::ParentCommentNotFound
        ));
        for constraint in ["tweets_user_id_fkey", "comments_user_id_fkey"] {
            assert!(matches!(
                missing_reference(constraint),
                PostError::Auth(AuthError::AuthenticatedUserNotFound)
            ));
        }
    }

    #[test]
    fn test_other_errors_stay_database() {
        assert!(matches!(map_insert_error(sqlx::Error::RowNotFound), PostError::Database(_)));
    }
}
