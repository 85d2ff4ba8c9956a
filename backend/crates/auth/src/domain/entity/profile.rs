//! User Profile read model
//!
//! A user together with its follow graph, loaded in one repository call.

use kernel::id::UserId;

use crate::domain::entity::user::User;

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: User,
    /// Users this user follows, ascending by id
    pub following_ids: Vec<UserId>,
    pub followers_count: i64,
}

impl UserProfile {
    /// Profile of a user with no follow edges yet
    pub fn fresh(user: User) -> Self {
        Self {
            user,
            following_ids: Vec::new(),
            followers_count: 0,
        }
    }

    pub fn following_count(&self) -> usize {
        self.following_ids.len()
    }
}
