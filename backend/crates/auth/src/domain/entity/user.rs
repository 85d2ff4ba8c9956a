//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{ScreenName, UserPassword, UserRole};

/// Persisted user account
///
/// Equality is by `user_id` only.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique handle used for login and display
    pub screen_name: ScreenName,
    /// Never leaves the service layer
    pub password_hash: UserPassword,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }

    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn set_profile_image(&mut self, profile_image: String) {
        self.profile_image = Some(profile_image);
        self.updated_at = Utc::now();
    }

    pub fn set_bio(&mut self, bio: String) {
        self.bio = Some(bio);
        self.updated_at = Utc::now();
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Eq for User {}

/// A user that has not been stored yet (the database assigns the id)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub screen_name: ScreenName,
    pub password_hash: UserPassword,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub user_role: UserRole,
}
