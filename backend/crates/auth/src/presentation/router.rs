//! Auth and Users Routers

use axum::{
    Router,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Routes mounted under `/api/auth`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Routes mounted under `/api/users`
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_users::<R>))
        .route(
            "/me",
            get(handlers::get_me::<R>)
                .put(handlers::update_me::<R>)
                .delete(handlers::delete_me::<R>),
        )
        .route("/{id}", get(handlers::get_user::<R>))
        .route("/{id}/follow", post(handlers::follow::<R>))
        .route("/{id}/unfollow", post(handlers::unfollow::<R>))
        .with_state(state)
}
