//! Login Use Case
//!
//! Verifies credentials and issues a signed access token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, ScreenName};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub screen_name: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            config,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // Unknown and malformed screen names fail exactly like a wrong password
        let screen_name =
            ScreenName::new(&input.screen_name).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_screen_name(&screen_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password = RawPassword::for_login(input.password);
        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue_for(&user)?;

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token })
    }
}
