//! Entity Module

pub mod caller;
pub mod profile;
pub mod user;

pub use caller::Caller;
pub use profile::UserProfile;
pub use user::{NewUser, User};
