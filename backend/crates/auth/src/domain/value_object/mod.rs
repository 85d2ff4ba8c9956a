//! Value Object Module

pub mod screen_name;
pub mod user_password;
pub mod user_role;

pub use screen_name::{ScreenName, ScreenNameError};
pub use user_password::{RawPassword, UserPassword};
pub use user_role::UserRole;
