//! Auth (Authentication) and Users Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, authorization policy, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, routers, bearer middleware
//!
//! ## Features
//! - Registration and login with screen name + password
//! - RS256 access tokens (`sub` = numeric user id)
//! - Public profiles, self-service updates and account deletion
//! - Follow / unfollow
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never returned by the API
//! - Every caller-scoped operation re-loads the caller from storage
//! - Owners modify their content; owners and ADMINs delete it

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::TokenService;
pub use domain::entity::Caller;
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryAuthRepository, PgAuthRepository};
pub use presentation::{AuthAppState, auth_router, authenticate, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
