//! Post Content Value Object
//!
//! Body text shared by tweets and comments.
//!
//! ## Invariants
//! - Not empty, not whitespace only
//! - At most 280 characters (code points)
//! - Stored as written; surrounding whitespace is kept

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for tweet and comment content (in characters)
pub const POST_CONTENT_MAX_LENGTH: usize = 280;

/// Error returned when content validation fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostContentError {
    #[error("Content is required")]
    Blank,
    #[error("Content must be up to {max} characters")]
    TooLong { max: usize, actual: usize },
}

/// Validated tweet or comment body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostContent(String);

impl PostContent {
    pub fn new(raw: impl Into<String>) -> Result<Self, PostContentError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(PostContentError::Blank);
        }

        let actual = raw.chars().count();
        if actual > POST_CONTENT_MAX_LENGTH {
            return Err(PostContentError::TooLong {
                max: POST_CONTENT_MAX_LENGTH,
                actual,
            });
        }

        Ok(Self(raw))
    }

    /// Restore a value read back from the database
    pub(crate) fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PostContent {
    type Error = PostContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PostContent> for String {
    fn from(content: PostContent) -> Self {
        content.0
    }
}

impl fmt::Display for PostContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
