//! Auth Middleware
//!
//! Bearer token authentication for every route.
//!
//! - No `Authorization: Bearer` header: the request continues anonymously
//! - A bearer token that fails verification: 401, even on public routes
//! - A valid token: the [`Caller`] is stored in request extensions
//!
//! Handlers that need a caller take [`Caller`] as an extractor, which
//! rejects anonymous requests with 401.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::TokenService;
use crate::domain::entity::Caller;
use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Middleware that verifies a bearer token when one is present
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(|token| token.trim().to_string());

    if let Some(token) = token {
        match tokens.verify(&token) {
            Ok(caller) => {
                tracing::debug!(user_id = %caller.user_id, "Authenticated request");
                req.extensions_mut().insert(caller);
            }
            Err(e) => return e.into_response(),
        }
    }

    next.run(req).await
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or(AuthError::TokenMissing)
    }
}
