//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::validation::non_blank;

use crate::application::config::AuthConfig;
use crate::domain::entity::{NewUser, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, ScreenName, UserPassword, UserRole};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub screen_name: String,
    pub password: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    /// Defaults to `USER`
    pub role: Option<UserRole>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<UserProfile> {
        let screen_name = ScreenName::new(&input.screen_name)?;

        if self.user_repo.exists_by_screen_name(&screen_name).await? {
            return Err(AuthError::ScreenNameTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        // A concurrent registration can still win the race; the repository
        // reports the unique violation as ScreenNameTaken.
        let user = self
            .user_repo
            .create(&NewUser {
                screen_name,
                password_hash,
                profile_image: non_blank(input.profile_image),
                bio: non_blank(input.bio),
                user_role: input.role.unwrap_or_default(),
            })
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            screen_name = %user.screen_name,
            role = %user.user_role,
            "User registered"
        );

        Ok(UserProfile::fresh(user))
    }
}
