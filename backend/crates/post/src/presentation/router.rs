//! Tweets and Comments Routers

use auth::domain::repository::UserRepository;
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::domain::repository::{CommentRepository, TweetRepository};
use crate::presentation::handlers::{self, PostAppState};

/// Routes mounted under `/api/tweets`
pub fn tweets_router<P, U>(state: PostAppState<P, U>) -> Router
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_tweets::<P, U>).post(handlers::create_tweet::<P, U>),
        )
        .route(
            "/{id}",
            get(handlers::get_tweet::<P, U>)
                .put(handlers::update_tweet::<P, U>)
                .delete(handlers::delete_tweet::<P, U>),
        )
        .route(
            "/{id}/comments",
            get(handlers::list_comments::<P, U>).post(handlers::create_comment::<P, U>),
        )
        .with_state(state)
}

/// Routes mounted under `/api/comments`
pub fn comments_router<P, U>(state: PostAppState<P, U>) -> Router
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/{id}", delete(handlers::delete_comment::<P, U>))
        .route("/{id}/replies", post(handlers::reply_to_comment::<P, U>))
        .with_state(state)
}

/// Both routers, nested at their `/api` paths
pub fn post_router<P, U>(state: PostAppState<P, U>) -> Router
where
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .nest("/api/tweets", tweets_router(state.clone()))
        .nest("/api/comments", comments_router(state))
}
