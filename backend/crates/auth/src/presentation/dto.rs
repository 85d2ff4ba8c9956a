//! API DTOs (Data Transfer Objects)

use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entity::UserProfile;
use crate::domain::value_object::UserRole;

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(
        custom(function = "kernel::validation::not_blank", message = "Screen name is required"),
        length(max = 255, message = "Screen name must be at most 255 characters long")
    )]
    pub screen_name: String,
    #[validate(
        custom(function = "kernel::validation::not_blank", message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters long")
    )]
    pub password: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub role: Option<UserRole>,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(custom(
        function = "kernel::validation::not_blank",
        message = "Screen name is required"
    ))]
    pub screen_name: String,
    #[validate(custom(
        function = "kernel::validation::not_blank",
        message = "Password is required"
    ))]
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Update of the caller's own account; absent or blank fields are left as is
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

/// Public profile
///
/// Never carries the password or its hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub userid: UserId,
    pub screen_name: String,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub role: UserRole,
    pub following_count: usize,
    pub followers_count: i64,
    pub following_ids: Vec<UserId>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        let following_count = profile.following_count();
        let user = profile.user;
        Self {
            userid: user.user_id,
            screen_name: user.screen_name.into(),
            profile_image: user.profile_image,
            bio: user.bio,
            role: user.user_role,
            following_count,
            followers_count: profile.followers_count,
            following_ids: profile.following_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(screen_name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            screen_name: screen_name.to_string(),
            password: password.to_string(),
            profile_image: None,
            bio: None,
            role: None,
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("alice", "secret1").validate().is_ok());

        let errors = register("", "abc").validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("screen_name"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_register_request_parses_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"screenName":"alice","password":"secret1","bio":"hi","role":"ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(req.screen_name, "alice");
        assert_eq!(req.bio.as_deref(), Some("hi"));
        assert_eq!(req.role, Some(UserRole::Admin));
    }

    #[test]
    fn test_blank_login_is_rejected() {
        let req = LoginRequest {
            screen_name: "  ".to_string(),
            password: "x".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
