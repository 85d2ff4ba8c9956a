//! Domain Layer
//!
//! Contains entities, value objects, the authorization policy and
//! repository traits.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Caller, NewUser, User, UserProfile};
pub use repository::UserRepository;
