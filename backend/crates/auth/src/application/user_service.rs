//! User Service
//!
//! Profile reads, self-service updates and the follow graph.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::validation::non_blank;

use crate::application::config::AuthConfig;
use crate::domain::entity::{Caller, User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Re-load the user behind a verified token
///
/// Every caller-scoped operation starts here, so a token that outlives its
/// account is rejected with `AuthenticatedUserNotFound`.
pub async fn authenticated_user<U>(user_repo: &U, caller: &Caller) -> AuthResult<User>
where
    U: UserRepository,
{
    user_repo
        .find_by_id(caller.user_id)
        .await?
        .ok_or(AuthError::AuthenticatedUserNotFound)
}

/// Fields a user may change on their own account; blank values are ignored
#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub password: Option<String>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

/// User service
pub struct UserService<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UserService<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn list(&self) -> AuthResult<Vec<UserProfile>> {
        self.user_repo.list_profiles().await
    }

    pub async fn get(&self, user_id: UserId) -> AuthResult<UserProfile> {
        self.user_repo
            .find_profile(user_id)
            .await?
            .ok_or(AuthError::UserNotFound(user_id))
    }

    pub async fn me(&self, caller: &Caller) -> AuthResult<UserProfile> {
        self.user_repo
            .find_profile(caller.user_id)
            .await?
            .ok_or(AuthError::AuthenticatedUserNotFound)
    }

    pub async fn update(&self, caller: &Caller, input: UpdateUserInput) -> AuthResult<UserProfile> {
        let mut user = authenticated_user(self.user_repo.as_ref(), caller).await?;

        if let Some(password) = non_blank(input.password) {
            let raw = RawPassword::new(password)?;
            user.set_password(UserPassword::from_raw(&raw, self.config.pepper())?);
        }
        if let Some(profile_image) = non_blank(input.profile_image) {
            user.set_profile_image(profile_image);
        }
        if let Some(bio) = non_blank(input.bio) {
            user.set_bio(bio);
        }

        self.user_repo.update(&user).await?;
        tracing::info!(user_id = %user.user_id, "User updated");

        self.me(caller).await
    }

    pub async fn delete(&self, caller: &Caller) -> AuthResult<()> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;

        if !self.user_repo.delete(user.user_id).await? {
            return Err(AuthError::AuthenticatedUserNotFound);
        }

        tracing::info!(user_id = %user.user_id, "User deleted");
        Ok(())
    }

    pub async fn follow(&self, caller: &Caller, target_id: UserId) -> AuthResult<()> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;

        let target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::FollowTargetNotFound)?;

        if target == user {
            return Err(AuthError::CannotFollowSelf);
        }

        self.user_repo.follow(user.user_id, target.user_id).await?;
        tracing::debug!(user_id = %user.user_id, target_id = %target.user_id, "Followed user");
        Ok(())
    }

    pub async fn unfollow(&self, caller: &Caller, target_id: UserId) -> AuthResult<()> {
        let user = authenticated_user(self.user_repo.as_ref(), caller).await?;

        let target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UnfollowTargetNotFound)?;

        self.user_repo.unfollow(user.user_id, target.user_id).await?;
        tracing::debug!(user_id = %user.user_id, target_id = %target.user_id, "Unfollowed user");
        Ok(())
    }
}
