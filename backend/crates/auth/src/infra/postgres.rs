//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::{foreign_key_violation, is_unique_violation};
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::{NewUser, User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{ScreenName, UserPassword, UserRole};
use crate::error::{AuthError, AuthResult};

/// Columns of `users`, in `UserRow` order
const USER_COLUMNS: &str = r#"
    u.user_id,
    u.screen_name,
    u.password_hash,
    u.profile_image,
    u.bio,
    u.user_role,
    u.created_at,
    u.updated_at
"#;

/// Follow graph columns appended to `USER_COLUMNS` for `ProfileRow`
const FOLLOW_COLUMNS: &str = r#"
    ARRAY(
        SELECT f.following_id FROM user_following f
        WHERE f.user_id = u.user_id
        ORDER BY f.following_id
    ) AS following_ids,
    (SELECT COUNT(*) FROM user_following f WHERE f.following_id = u.user_id) AS followers_count
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A follow edge whose endpoint was deleted after the service looked it up
fn missing_follow_endpoint(constraint: &str) -> AuthError {
    match constraint {
        "user_following_following_id_fkey" => AuthError::FollowTargetNotFound,
        _ => AuthError::AuthenticatedUserNotFound,
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                screen_name,
                password_hash,
                profile_image,
                bio,
                user_role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING
                user_id,
                screen_name,
                password_hash,
                profile_image,
                bio,
                user_role,
                created_at,
                updated_at
            "#,
        )
        .bind(user.screen_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.profile_image)
        .bind(&user.bio)
        .bind(user.user_role.code())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::ScreenNameTaken
            } else {
                AuthError::Database(e)
            }
        })?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_screen_name(&self, screen_name: &ScreenName) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.screen_name = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(screen_name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_screen_name(&self, screen_name: &ScreenName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE screen_name = $1)",
        )
        .bind(screen_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_profile(&self, user_id: UserId) -> AuthResult<Option<UserProfile>> {
        let sql =
            format!("SELECT {USER_COLUMNS}, {FOLLOW_COLUMNS} FROM users u WHERE u.user_id = $1");
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    async fn list_profiles(&self) -> AuthResult<Vec<UserProfile>> {
        let sql =
            format!("SELECT {USER_COLUMNS}, {FOLLOW_COLUMNS} FROM users u ORDER BY u.user_id");
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ProfileRow::into_profile).collect()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                profile_image = $3,
                bio = $4,
                updated_at = $5
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_i64())
        .bind(user.password_hash.as_phc_string())
        .bind(&user.profile_image)
        .bind(&user.bio)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<bool> {
        // tweets, comments and user_following rows cascade via foreign keys
        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn follow(&self, follower_id: UserId, followee_id: UserId) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_following (user_id, following_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(follower_id.as_i64())
        .bind(followee_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| match foreign_key_violation(&e) {
            Some(constraint) => missing_follow_endpoint(constraint),
            None => AuthError::Database(e),
        })?;

        Ok(())
    }

    async fn unfollow(&self, follower_id: UserId, followee_id: UserId) -> AuthResult<()> {
        sqlx::query("DELETE FROM user_following WHERE user_id = $1 AND following_id = $2")
            .bind(follower_id.as_i64())
            .bind(followee_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    screen_name: String,
    password_hash: String,
    profile_image: Option<String>,
    bio: Option<String>,
    user_role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let user_role = UserRole::from_code(&self.user_role).ok_or_else(|| {
            AuthError::Internal(format!("Invalid user_role: {}", self.user_role))
        })?;

        Ok(User {
            user_id: UserId::from_i64(self.user_id),
            screen_name: ScreenName::from_db(self.screen_name),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            profile_image: self.profile_image,
            bio: self.bio,
            user_role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    #[sqlx(flatten)]
    user: UserRow,
    following_ids: Vec<i64>,
    followers_count: i64,
}

impl ProfileRow {
    fn into_profile(self) -> AuthResult<UserProfile> {
        Ok(UserProfile {
            user: self.user.into_user()?,
            following_ids: self.following_ids.into_iter().map(UserId::from_i64).collect(),
            followers_count: self.followers_count,
        })
    }
}
