//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::UserId;

use crate::domain::entity::{NewUser, User, UserProfile};
use crate::domain::value_object::ScreenName;
use crate::error::AuthResult;

/// User repository trait
///
/// Every method is a single atomic write or a consistent read.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return it with its assigned id
    ///
    /// Fails with `AuthError::ScreenNameTaken` on a duplicate screen name.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_screen_name(&self, screen_name: &ScreenName) -> AuthResult<Option<User>>;

    async fn exists_by_screen_name(&self, screen_name: &ScreenName) -> AuthResult<bool>;

    /// Load a user with its following ids and follower count
    async fn find_profile(&self, user_id: UserId) -> AuthResult<Option<UserProfile>>;

    /// All profiles, ascending by user id
    async fn list_profiles(&self) -> AuthResult<Vec<UserProfile>>;

    /// Persist password hash, profile image and bio
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete a user; tweets, comments and follow edges go with it
    ///
    /// Returns whether a row was deleted.
    async fn delete(&self, user_id: UserId) -> AuthResult<bool>;

    /// Add a follow edge (no-op if it exists)
    async fn follow(&self, follower_id: UserId, followee_id: UserId) -> AuthResult<()>;

    /// Remove a follow edge (no-op if absent)
    async fn unfollow(&self, follower_id: UserId, followee_id: UserId) -> AuthResult<()>;
}
