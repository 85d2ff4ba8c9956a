//! Post Error Types
//!
//! Tweet and comment errors. Failures coming from the `auth` crate
//! (caller re-load, database) are wrapped and rendered unchanged.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::PostContentError;

/// Post-specific result type alias
pub type PostResult<T> = Result<T, PostError>;

/// Post-specific error variants
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Tweet not found")]
    TweetNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Parent comment not found")]
    ParentCommentNotFound,

    /// Only the owner may edit, ADMIN included
    #[error("You are not allowed to update this tweet")]
    TweetUpdateDenied,

    #[error("You are not allowed to delete this tweet")]
    TweetDeleteDenied,

    #[error("You are not allowed to delete this comment")]
    CommentDeleteDenied,

    #[error("{0}")]
    InvalidContent(#[from] PostContentError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PostError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostError::TweetNotFound
            | PostError::CommentNotFound
            | PostError::ParentCommentNotFound => ErrorKind::NotFound,
            PostError::TweetUpdateDenied
            | PostError::TweetDeleteDenied
            | PostError::CommentDeleteDenied => ErrorKind::Forbidden,
            PostError::InvalidContent(_) => ErrorKind::BadRequest,
            PostError::Auth(e) => e.kind(),
            PostError::Database(_) | PostError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            PostError::Database(_) | PostError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            PostError::InvalidContent(_) => {
                AppError::bad_request("Validation failed").with_field("content", self.to_string())
            }
            PostError::Auth(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            PostError::Database(e) => {
                tracing::error!(error = %e, "Post database error");
            }
            PostError::Internal(msg) => {
                tracing::error!(message = %msg, "Post internal error");
            }
            PostError::TweetUpdateDenied
            | PostError::TweetDeleteDenied
            | PostError::CommentDeleteDenied => {
                tracing::warn!(error = %self, "Permission denied");
            }
            _ => {
                tracing::debug!(error = %self, "Post error");
            }
        }
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        match self {
            // AuthError logs itself
            PostError::Auth(e) => e.into_response(),
            other => {
                other.log();
                other.to_app_error().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PostError::TweetNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            PostError::ParentCommentNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PostError::TweetUpdateDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PostError::CommentDeleteDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PostError::InvalidContent(PostContentError::Blank).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_auth_errors_pass_through() {
        let err = PostError::from(AuthError::AuthenticatedUserNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Authenticated user not found");
        assert_eq!(err.to_app_error().message(), "Authenticated user not found");
    }

    #[test]
    fn test_content_error_carries_field() {
        let app_err = PostError::InvalidContent(PostContentError::TooLong {
            max: 280,
            actual: 300,
        })
        .to_app_error();
        assert_eq!(
            app_err.fields().unwrap()["content"],
            "Content must be up to 280 characters"
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let app_err = PostError::Internal("dangling author".to_string()).to_app_error();
        assert_eq!(app_err.message(), "Internal server error");
    }
}
