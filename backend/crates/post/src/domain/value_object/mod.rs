//! Value Objects

pub mod post_content;

pub use post_content::{POST_CONTENT_MAX_LENGTH, PostContent, PostContentError};
