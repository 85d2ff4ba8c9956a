use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role
///
/// Stored and serialized as `USER` / `ADMIN`. An ADMIN may delete any tweet
/// or comment, but may not edit content owned by others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    const SCOPE_PREFIX: &'static str = "ROLE_";

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Token scope carried in access tokens (`ROLE_USER` / `ROLE_ADMIN`)
    #[inline]
    pub const fn scope(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(UserRole::User),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn from_scope(scope: &str) -> Option<Self> {
        scope
            .strip_prefix(Self::SCOPE_PREFIX)
            .and_then(Self::from_code)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("USER"), Some(UserRole::User));
        assert_eq!(UserRole::from_code("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("admin"), None);
        assert_eq!(UserRole::from_code("MODERATOR"), None);
    }

    #[test]
    fn test_user_role_scope() {
        assert_eq!(UserRole::User.scope(), "ROLE_USER");
        assert_eq!(UserRole::Admin.scope(), "ROLE_ADMIN");
        assert_eq!(UserRole::from_scope("ROLE_ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_scope("ADMIN"), None);
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
        assert!(serde_json::from_str::<UserRole>("\"ROOT\"").is_err());
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(UserRole::default(), UserRole::User);
        assert!(!UserRole::User.is_admin());
        assert!(UserRole::Admin.is_admin());
    }
}
