//! Domain Entities

pub mod comment;
pub mod tweet;

pub use comment::{Comment, NewComment};
pub use tweet::{Author, NewTweet, Tweet};
