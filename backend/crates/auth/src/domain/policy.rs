//! Authorization policy
//!
//! Pure decisions over a re-loaded caller and the owner of a resource.
//! Owners may modify their content; owners and ADMINs may delete it.

use kernel::id::UserId;

use crate::domain::entity::User;

#[inline]
pub fn is_owner(caller: &User, owner_id: UserId) -> bool {
    caller.user_id == owner_id
}

/// Edit rights: the owner only, ADMIN included
#[inline]
pub fn can_modify(caller: &User, owner_id: UserId) -> bool {
    is_owner(caller, owner_id)
}

#[inline]
pub fn can_delete(caller: &User, owner_id: UserId) -> bool {
    is_owner(caller, owner_id) || caller.is_admin()
}

/// `Err(denied)` unless the caller may modify the resource
pub fn ensure_can_modify<E>(caller: &User, owner_id: UserId, denied: E) -> Result<(), E> {
    if can_modify(caller, owner_id) {
        Ok(())
    } else {
        Err(denied)
    }
}

/// `Err(denied)` unless the caller may delete the resource
pub fn ensure_can_delete<E>(caller: &User, owner_id: UserId, denied: E) -> Result<(), E> {
    if can_delete(caller, owner_id) {
        Ok(())
    } else {
        Err(denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{RawPassword, ScreenName, UserPassword, UserRole};
    use chrono::Utc;
    use std::sync::LazyLock;

    static HASH: LazyLock<UserPassword> = LazyLock::new(|| {
        let raw = RawPassword::new("secret1".to_string()).unwrap();
        UserPassword::from_raw(&raw, None).unwrap()
    });

    fn user(id: i64, role: UserRole) -> User {
        User {
            user_id: UserId::from_i64(id),
            screen_name: ScreenName::new(format!("user{id}")).unwrap(),
            password_hash: HASH.clone(),
            profile_image: None,
            bio: None,
            user_role: role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_may_modify_and_delete() {
        let owner = user(1, UserRole::User);
        assert!(is_owner(&owner, UserId::from_i64(1)));
        assert!(can_modify(&owner, UserId::from_i64(1)));
        assert!(can_delete(&owner, UserId::from_i64(1)));
    }

    #[test]
    fn test_stranger_may_do_nothing() {
        let stranger = user(2, UserRole::User);
        assert!(!can_modify(&stranger, UserId::from_i64(1)));
        assert!(!can_delete(&stranger, UserId::from_i64(1)));
        assert_eq!(
            ensure_can_delete(&stranger, UserId::from_i64(1), "denied"),
            Err("denied")
        );
    }

    #[test]
    fn test_admin_may_delete_but_not_modify() {
        let admin = user(3, UserRole::Admin);
        assert!(!can_modify(&admin, UserId::from_i64(1)));
        assert!(can_delete(&admin, UserId::from_i64(1)));
        assert_eq!(ensure_can_delete(&admin, UserId::from_i64(1), "denied"), Ok(()));
        assert_eq!(
            ensure_can_modify(&admin, UserId::from_i64(1), "denied"),
            Err("denied")
        );
    }
}
