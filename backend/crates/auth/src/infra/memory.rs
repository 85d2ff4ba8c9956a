//! In-memory Repository
//!
//! Arena of users and follow edges behind a `tokio::sync::RwLock`. Each
//! repository call takes the lock once, so calls are atomic with respect to
//! each other. Used by tests and for running the API without a database.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::{NewUser, User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::ScreenName;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct UserTables {
    last_id: i64,
    users: BTreeMap<UserId, User>,
    /// (follower, followee)
    following: BTreeSet<(UserId, UserId)>,
}

impl UserTables {
    fn profile(&self, user: &User) -> UserProfile {
        let following_ids = self
            .following
            .iter()
            .filter(|(follower, _)| *follower == user.user_id)
            .map(|(_, followee)| *followee)
            .collect();
        let followers_count = self
            .following
            .iter()
            .filter(|(_, followee)| *followee == user.user_id)
            .count() as i64;

        UserProfile {
            user: user.clone(),
            following_ids,
            followers_count,
        }
    }
}

/// In-memory user store
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    tables: Arc<RwLock<UserTables>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Screen names of every stored user
    ///
    /// Other in-memory stores join against this to resolve authors and to
    /// drop rows whose owner has been deleted.
    pub async fn screen_names(&self) -> BTreeMap<UserId, String> {
        self.tables
            .read()
            .await
            .users
            .iter()
            .map(|(id, user)| (*id, user.screen_name.to_string()))
            .collect()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .values()
            .any(|u| u.screen_name == user.screen_name)
        {
            return Err(AuthError::ScreenNameTaken);
        }

        tables.last_id += 1;
        let now = Utc::now();
        let created = User {
            user_id: UserId::from_i64(tables.last_id),
            screen_name: user.screen_name.clone(),
            password_hash: user.password_hash.clone(),
            profile_image: user.profile_image.clone(),
            bio: user.bio.clone(),
            user_role: user.user_role,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(created.user_id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&user_id).cloned())
    }

    async fn find_by_screen_name(&self, screen_name: &ScreenName) -> AuthResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| &u.screen_name == screen_name)
            .cloned())
    }

    async fn exists_by_screen_name(&self, screen_name: &ScreenName) -> AuthResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .any(|u| &u.screen_name == screen_name))
    }

    async fn find_profile(&self, user_id: UserId) -> AuthResult<Option<UserProfile>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&user_id).map(|u| tables.profile(u)))
    }

    async fn list_profiles(&self) -> AuthResult<Vec<UserProfile>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().map(|u| tables.profile(u)).collect())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables.users.get_mut(&user.user_id) {
            stored.password_hash = user.password_hash.clone();
            stored.profile_image = user.profile_image.clone();
            stored.bio = user.bio.clone();
            stored.updated_at = user.updated_at;
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = tables.users.remove(&user_id).is_some();
        tables
            .following
            .retain(|(follower, followee)| *follower != user_id && *followee != user_id);
        Ok(removed)
    }

    async fn follow(&self, follower_id: UserId, followee_id: UserId) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&follower_id) && tables.users.contains_key(&followee_id) {
            tables.following.insert((follower_id, followee_id));
        }
        Ok(())
    }

    async fn unfollow(&self, follower_id: UserId, followee_id: UserId) -> AuthResult<()> {
        self.tables
            .write()
            .await
            .following
            .remove(&(follower_id, followee_id));
        Ok(())
    }
}
