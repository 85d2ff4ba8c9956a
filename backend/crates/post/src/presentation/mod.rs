//! Presentation Layer
//!
//! HTTP handlers, DTOs and routers.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::PostAppState;
pub use router::{comments_router, post_router, tweets_router};
