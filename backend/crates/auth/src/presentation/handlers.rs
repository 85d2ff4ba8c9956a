//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::{Path, ValidatedJson};
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::{
    AuthConfig, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, TokenService,
    UpdateUserInput, UserService,
};
use crate::domain::entity::Caller;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, UpdateUserRequest, UserResponse,
};

/// Shared state for auth and user handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig, tokens: TokenService) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }

    fn user_service(&self) -> UserService<R> {
        UserService::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let profile = use_case
        .execute(RegisterInput {
            screen_name: req.screen_name,
            password: req.password,
            profile_image: req.profile_image,
            bio: req.bio,
            role: req.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(profile))))
}

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            screen_name: req.screen_name,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let profiles = state.user_service().list().await?;
    Ok(Json(profiles.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(user_id): Path<UserId>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let profile = state.user_service().get(user_id).await?;
    Ok(Json(profile.into()))
}

/// GET /api/users/me
pub async fn get_me<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let profile = state.user_service().me(&caller).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/users/me
pub async fn update_me<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let profile = state
        .user_service()
        .update(
            &caller,
            UpdateUserInput {
                password: req.password,
                profile_image: req.profile_image,
                bio: req.bio,
            },
        )
        .await?;
    Ok(Json(profile.into()))
}

/// DELETE /api/users/me
pub async fn delete_me<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    state.user_service().delete(&caller).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/{id}/follow
pub async fn follow<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Path(target_id): Path<UserId>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    state.user_service().follow(&caller, target_id).await?;
    Ok(StatusCode::OK)
}

/// POST /api/users/{id}/unfollow
pub async fn unfollow<R>(
    State(state): State<AuthAppState<R>>,
    caller: Caller,
    Path(target_id): Path<UserId>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    state.user_service().unfollow(&caller, target_id).await?;
    Ok(StatusCode::OK)
}
