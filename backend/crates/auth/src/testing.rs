//! Test support shared with dependent crates (`testing` feature)

use std::sync::LazyLock;

use chrono::Utc;
use kernel::id::UserId;
use platform::token::TokenKeys;

use crate::application::{AuthConfig, RegisterInput, RegisterUseCase, TokenService};
use crate::domain::entity::{Caller, User, UserProfile};
use crate::domain::value_object::{RawPassword, ScreenName, UserPassword, UserRole};
use crate::infra::MemoryAuthRepository;
use crate::presentation::AuthAppState;

const PRIVATE_PEM: &str = include_str!("../../platform/testdata/private_key.pem");
const PUBLIC_PEM: &str = include_str!("../../platform/testdata/public_key.pem");

/// Hashing is slow on purpose; share one hash between fixtures
static FIXTURE_HASH: LazyLock<UserPassword> = LazyLock::new(|| {
    let raw = RawPassword::new("secret1".to_string()).unwrap();
    UserPassword::from_raw(&raw, None).unwrap()
});

/// Fixed RSA key pair
pub fn test_keys() -> TokenKeys {
    TokenKeys::from_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes()).unwrap()
}

pub fn test_tokens() -> TokenService {
    TokenService::new(&test_keys(), &AuthConfig::default())
}

/// Detached user entity (not stored anywhere)
pub fn test_user(id: i64, screen_name: &str, role: UserRole) -> User {
    User {
        user_id: UserId::from_i64(id),
        screen_name: ScreenName::new(screen_name).unwrap(),
        password_hash: FIXTURE_HASH.clone(),
        profile_image: None,
        bio: None,
        user_role: role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn caller_of(user: &User) -> Caller {
    Caller {
        user_id: user.user_id,
        screen_name: user.screen_name.to_string(),
        role: user.user_role,
    }
}

/// Register through the real use case and return the caller identity
pub async fn register_user(
    repo: &MemoryAuthRepository,
    screen_name: &str,
    role: UserRole,
) -> Caller {
    let use_case = RegisterUseCase::new(
        std::sync::Arc::new(repo.clone()),
        std::sync::Arc::new(AuthConfig::default()),
    );
    let profile: UserProfile = use_case
        .execute(RegisterInput {
            screen_name: screen_name.to_string(),
            password: "secret1".to_string(),
            profile_image: None,
            bio: None,
            role: Some(role),
        })
        .await
        .unwrap();
    caller_of(&profile.user)
}

/// Handler state over an in-memory store and the fixed test keys
pub fn memory_state(repo: MemoryAuthRepository) -> AuthAppState<MemoryAuthRepository> {
    AuthAppState::new(repo, AuthConfig::default(), test_tokens())
}
