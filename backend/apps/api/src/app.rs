//! Router assembly
//!
//! Mounts every route under `/api` and wraps them with bearer
//! authentication, request tracing and CORS (outermost, so preflights
//! never reach the auth layer).

use auth::domain::repository::UserRepository;
use auth::{AuthAppState, auth_router, authenticate, users_router};
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use post::domain::repository::{CommentRepository, TweetRepository};
use post::{PostAppState, post_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn build_router<U, P>(
    auth_state: AuthAppState<U>,
    post_state: PostAppState<P, U>,
    cors: CorsLayer,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: TweetRepository + CommentRepository + Send + Sync + 'static,
{
    let tokens = auth_state.tokens.clone();

    Router::new()
        .nest("/api/auth", auth_router(auth_state.clone()))
        .nest("/api/users", users_router(auth_state))
        .merge(post_router(post_state))
        .layer(from_fn_with_state(tokens, authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
