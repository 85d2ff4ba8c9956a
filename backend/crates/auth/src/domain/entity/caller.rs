//! Caller identity
//!
//! Who is making the request, as asserted by a verified access token.
//! Services re-load the user behind it before acting on its behalf.

use kernel::id::UserId;

use crate::domain::value_object::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub screen_name: String,
    pub role: UserRole,
}
