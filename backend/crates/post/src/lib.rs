//! Post (Tweets and Comments) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Tweet and comment entities, content rules, repository traits
//! - `application/` - Tweet and comment services
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Tweets: public listing, owner-only edits, owner or ADMIN deletion
//! - Comments: root comments and replies forming a tree per tweet
//! - Deleting a tweet or a comment removes everything below it
//!
//! Caller identity comes from the `auth` crate's bearer middleware; the
//! services re-load the caller through `auth`'s user repository.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{PostError, PostResult};
pub use infra::{MemoryPostRepository, PgPostRepository};
pub use presentation::{PostAppState, post_router};
