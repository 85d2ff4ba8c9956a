//! HTTP Handlers

use std::sync::Arc;

use auth::Caller;
use auth::domain::repository::UserRepository;
use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use kernel::extract::{Path, ValidatedJson};
use kernel::id::{CommentId, TweetId};

use crate::application::{CommentService, TweetService};
use crate::domain::entity::Comment;
use crate::domain::repository::{CommentRepository, TweetRepository};
use crate::error::PostResult;
use crate::presentation::dto::{CommentRequest, CommentResponse, TweetRequest, TweetResponse};

/// Shared state for tweet and comment handlers
pub struct PostAppState<P, U>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    pub posts: Arc<P>,
    pub users: Arc<U>,
}

// Manual impl: the repositories sit behind `Arc`, so they need not be Clone
impl<P, U> Clone for PostAppState<P, U>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            users: self.users.clone(),
        }
    }
}

impl<P, U> PostAppState<P, U>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    /// `users` is the same store the auth routes use
    pub fn new(posts: P, users: Arc<U>) -> Self {
        Self {
            posts: Arc::new(posts),
            users,
        }
    }

    fn tweet_service(&self) -> TweetService<P, U> {
        TweetService::new(self.posts.clone(), self.users.clone())
    }

    fn comment_service(&self) -> CommentService<P, U> {
        CommentService::new(self.posts.clone(), self.users.clone())
    }
}

// ============================================================================
// Tweets
// ============================================================================

/// GET /api/tweets
pub async fn list_tweets<P, U>(
    State(state): State<PostAppState<P, U>>,
) -> PostResult<Json<Vec<TweetResponse>>>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let tweets = state.tweet_service().list().await?;
    Ok(Json(tweets.into_iter().map(TweetResponse::from).collect()))
}

/// GET /api/tweets/{id}
pub async fn get_tweet<P, U>(
    State(state): State<PostAppState<P, U>>,
    Path(tweet_id): Path<TweetId>,
) -> PostResult<Json<TweetResponse>>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let tweet = state.tweet_service().get(tweet_id).await?;
    Ok(Json(tweet.into()))
}

/// POST /api/tweets
pub async fn create_tweet<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: Caller,
    ValidatedJson(req): ValidatedJson<TweetRequest>,
) -> PostResult<impl IntoResponse>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let tweet = state.tweet_service().create(&caller, req.content).await?;
    let location = format!("/api/tweets/{}", tweet.tweet_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TweetResponse::from(tweet)),
    ))
}

/// PUT /api/tweets/{id}
pub async fn update_tweet<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: Caller,
    Path(tweet_id): Path<TweetId>,
    ValidatedJson(req): ValidatedJson<TweetRequest>,
) -> PostResult<Json<TweetResponse>>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let tweet = state
        .tweet_service()
        .update(&caller, tweet_id, req.content)
        .await?;
    Ok(Json(tweet.into()))
}

/// DELETE /api/tweets/{id}
pub async fn delete_tweet<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: Caller,
    Path(tweet_id): Path<TweetId>,
) -> PostResult<StatusCode>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    state.tweet_service().delete(&caller, tweet_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/tweets/{id}/comments
pub async fn list_comments<P, U>(
    State(state): State<PostAppState<P, U>>,
    Path(tweet_id): Path<TweetId>,
) -> PostResult<Json<Vec<CommentResponse>>>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let comments = state.comment_service().list_for_tweet(tweet_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// POST /api/tweets/{id}/comments
pub async fn create_comment<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: Caller,
    Path(tweet_id): Path<TweetId>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> PostResult<impl IntoResponse>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let comment = state
        .comment_service()
        .create_root(&caller, tweet_id, req.content)
        .await?;
    Ok(created_comment(comment))
}

/// POST /api/comments/{id}/replies
pub async fn reply_to_comment<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: Caller,
    Path(parent_comment_id): Path<CommentId>,
    ValidatedJson(req): ValidatedJson<CommentRequest>,
) -> PostResult<impl IntoResponse>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    let reply = state
        .comment_service()
        .reply(&caller, parent_comment_id, req.content)
        .await?;
    Ok(created_comment(reply))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: Caller,
    Path(comment_id): Path<CommentId>,
) -> PostResult<StatusCode>
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    state.comment_service().delete(&caller, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn created_comment(comment: Comment) -> impl IntoResponse {
    let location = format!("/api/comments/{}", comment.comment_id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CommentResponse::from(comment)),
    )
}
