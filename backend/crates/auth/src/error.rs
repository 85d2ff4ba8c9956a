//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::UserId;
use thiserror::Error;

use crate::domain::value_object::ScreenNameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Looked-up user does not exist
    #[error("User not found with id: {0}")]
    UserNotFound(UserId),

    /// Token subject no longer exists
    #[error("Authenticated user not found")]
    AuthenticatedUserNotFound,

    #[error("User to follow not found")]
    FollowTargetNotFound,

    #[error("User to unfollow not found")]
    UnfollowTargetNotFound,

    #[error("Screen name already in use")]
    ScreenNameTaken,

    #[error("{0}")]
    InvalidScreenName(#[from] ScreenNameError),

    /// Unknown screen name or wrong password (deliberately indistinguishable)
    #[error("Invalid screen name or password")]
    InvalidCredentials,

    /// Route requires a bearer token and none was sent
    #[error("Authentication required")]
    TokenMissing,

    /// Bearer token failed verification
    #[error("Invalid or expired token")]
    TokenInvalid,

    #[error("You cannot follow yourself")]
    CannotFollowSelf,

    #[error("{0}")]
    PasswordValidation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound(_)
            | AuthError::AuthenticatedUserNotFound
            | AuthError::FollowTargetNotFound
            | AuthError::UnfollowTargetNotFound => ErrorKind::NotFound,
            AuthError::ScreenNameTaken
            | AuthError::InvalidScreenName(_)
            | AuthError::CannotFollowSelf
            | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::TokenMissing | AuthError::TokenInvalid => {
                ErrorKind::Unauthorized
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::InvalidScreenName(_) => AppError::bad_request("Validation failed")
                .with_field("screenName", self.to_string()),
            AuthError::PasswordValidation(_) => AppError::bad_request("Validation failed")
                .with_field("password", self.to_string()),
            AuthError::TokenMissing | AuthError::TokenInvalid => {
                AppError::new(self.kind(), self.to_string()).with_action("Sign in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid => {
                tracing::warn!("Rejected invalid bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        use platform::token::TokenError;
        match err {
            TokenError::Expired | TokenError::Invalid(_) => AuthError::TokenInvalid,
            TokenError::InvalidKey(_) | TokenError::Signing(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}
