//! Crate-level tests: use cases against the in-memory store, and the HTTP
//! surface through `tower::ServiceExt::oneshot`.

mod service_tests {
    use std::sync::Arc;

    use kernel::id::UserId;

    use crate::application::{
        AuthConfig, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateUserInput,
        UserService,
    };
    use crate::domain::value_object::UserRole;
    use crate::error::AuthError;
    use crate::infra::MemoryAuthRepository;
    use crate::testing::{register_user, test_tokens};

    fn register_input(screen_name: &str, password: &str) -> RegisterInput {
        RegisterInput {
            screen_name: screen_name.to_string(),
            password: password.to_string(),
            profile_image: None,
            bio: None,
            role: None,
        }
    }

    fn user_service(repo: &MemoryAuthRepository) -> UserService<MemoryAuthRepository> {
        UserService::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()))
    }

    #[tokio::test]
    async fn test_register_returns_fresh_profile() {
        let repo = MemoryAuthRepository::new();
        let use_case =
            RegisterUseCase::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()));

        let profile = use_case
            .execute(register_input("alice", "secret1"))
            .await
            .unwrap();

        assert_eq!(profile.user.screen_name.as_str(), "alice");
        assert_eq!(profile.user.user_role, UserRole::User);
        assert_eq!(profile.following_count(), 0);
        assert_eq!(profile.followers_count, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_screen_name() {
        let repo = MemoryAuthRepository::new();
        let use_case =
            RegisterUseCase::new(Arc::new(repo.clone()), Arc::new(AuthConfig::default()));

        use_case
            .execute(register_input("alice", "secret1"))
            .await
            .unwrap();
        let err = use_case
            .execute(register_input("alice", "another1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::ScreenNameTaken));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let repo = MemoryAuthRepository::new();
        let use_case = RegisterUseCase::new(Arc::new(repo), Arc::new(AuthConfig::default()));

        let err = use_case
            .execute(register_input("bob", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_valid_credentials() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::Admin).await;
        let tokens = Arc::new(test_tokens());

        let use_case = LoginUseCase::new(
            Arc::new(repo),
            Arc::new(AuthConfig::default()),
            tokens.clone(),
        );
        let output = use_case
            .execute(LoginInput {
                screen_name: "alice".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap();

        let caller = tokens.verify(&output.token).unwrap();
        assert_eq!(caller, alice);
        assert_eq!(caller.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = MemoryAuthRepository::new();
        register_user(&repo, "alice", UserRole::User).await;
        let use_case = LoginUseCase::new(
            Arc::new(repo),
            Arc::new(AuthConfig::default()),
            Arc::new(test_tokens()),
        );

        let wrong_password = use_case
            .execute(LoginInput {
                screen_name: "alice".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        let unknown_user = use_case
            .execute(LoginInput {
                screen_name: "mallory".to_string(),
                password: "secret1".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let repo = MemoryAuthRepository::new();
        let err = user_service(&repo)
            .get(UserId::from_i64(99))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User not found with id: 99");
    }

    #[tokio::test]
    async fn test_follow_is_idempotent_and_counted() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;
        let bob = register_user(&repo, "bob", UserRole::User).await;
        let service = user_service(&repo);

        service.follow(&alice, bob.user_id).await.unwrap();
        service.follow(&alice, bob.user_id).await.unwrap();

        let alice_profile = service.me(&alice).await.unwrap();
        assert_eq!(alice_profile.following_ids, vec![bob.user_id]);
        assert_eq!(alice_profile.following_count(), 1);

        let bob_profile = service.get(bob.user_id).await.unwrap();
        assert_eq!(bob_profile.followers_count, 1);

        service.unfollow(&alice, bob.user_id).await.unwrap();
        service.unfollow(&alice, bob.user_id).await.unwrap();
        assert!(service.me(&alice).await.unwrap().following_ids.is_empty());
    }

    #[tokio::test]
    async fn test_cannot_follow_self() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;

        let err = user_service(&repo)
            .follow(&alice, alice.user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::CannotFollowSelf));
    }

    #[tokio::test]
    async fn test_follow_unknown_target() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;
        let service = user_service(&repo);

        let err = service
            .follow(&alice, UserId::from_i64(404))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::FollowTargetNotFound));

        let err = service
            .unfollow(&alice, UserId::from_i64(404))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnfollowTargetNotFound));
    }

    #[tokio::test]
    async fn test_update_ignores_blank_fields() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;
        let service = user_service(&repo);

        service
            .update(
                &alice,
                UpdateUserInput {
                    bio: Some("hello".to_string()),
                    profile_image: Some("https://img.example/a.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let profile = service
            .update(
                &alice,
                UpdateUserInput {
                    password: Some("   ".to_string()),
                    bio: Some("".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.user.bio.as_deref(), Some("hello"));
        assert_eq!(
            profile.user.profile_image.as_deref(),
            Some("https://img.example/a.png")
        );
    }

    #[tokio::test]
    async fn test_update_password_changes_login() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;
        user_service(&repo)
            .update(
                &alice,
                UpdateUserInput {
                    password: Some("new-secret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let login = LoginUseCase::new(
            Arc::new(repo),
            Arc::new(AuthConfig::default()),
            Arc::new(test_tokens()),
        );
        let old = login
            .execute(LoginInput {
                screen_name: "alice".to_string(),
                password: "secret1".to_string(),
            })
            .await;
        let new = login
            .execute(LoginInput {
                screen_name: "alice".to_string(),
                password: "new-secret".to_string(),
            })
            .await;

        assert!(old.is_err());
        assert!(new.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_short_password() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;

        let err = user_service(&repo)
            .update(
                &alice,
                UpdateUserInput {
                    password: Some("abc".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordValidation(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_user_and_edges() {
        let repo = MemoryAuthRepository::new();
        let alice = register_user(&repo, "alice", UserRole::User).await;
        let bob = register_user(&repo, "bob", UserRole::User).await;
        let service = user_service(&repo);

        service.follow(&bob, alice.user_id).await.unwrap();
        service.delete(&alice).await.unwrap();

        assert!(matches!(
            service.me(&alice).await,
            Err(AuthError::AuthenticatedUserNotFound)
        ));
        assert!(service.me(&bob).await.unwrap().following_ids.is_empty());

        // A token that outlives its account cannot act
        assert!(matches!(
            service.follow(&alice, bob.user_id).await,
            Err(AuthError::AuthenticatedUserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = MemoryAuthRepository::new();
        register_user(&repo, "carol", UserRole::User).await;
        register_user(&repo, "alice", UserRole::User).await;
        register_user(&repo, "bob", UserRole::User).await;

        let names: Vec<String> = user_service(&repo)
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.user.screen_name.to_string())
            .collect();
        assert_eq!(names, vec!["carol", "alice", "bob"]);
    }
}

mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::MemoryAuthRepository;
    use crate::presentation::{auth_router, authenticate, users_router};
    use crate::testing::memory_state;

    fn app() -> Router {
        let state = memory_state(MemoryAuthRepository::new());
        let tokens = state.tokens.clone();
        Router::new()
            .nest("/api/auth", auth_router(state.clone()))
            .nest("/api/users", users_router(state))
            .layer(from_fn_with_state(tokens, authenticate))
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn register_and_login(app: &Router, screen_name: &str) -> String {
        let credentials = json!({ "screenName": screen_name, "password": "secret1" });
        let (status, _) = send(
            app,
            request("POST", "/api/auth/register", None, Some(credentials.clone())),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) =
            send(app, request("POST", "/api/auth/login", None, Some(credentials))).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_register_response_shape() {
        let app = app();
        let (status, body) = send(
            &app,
            request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "screenName": "alice", "password": "secret1" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["screenName"], "alice");
        assert_eq!(body["followingCount"], 0);
        assert_eq!(body["followersCount"], 0);
        assert_eq!(body["role"], "USER");
        assert!(body["userid"].is_i64());
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = app();
        let (status, body) = send(
            &app,
            request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "screenName": " ", "password": "abc" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Validation failed");
        assert_eq!(body["fields"]["screenName"], "Screen name is required");
        assert_eq!(
            body["fields"]["password"],
            "Password must be at least 6 characters long"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app();
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"screenName\":"))
            .unwrap();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_bad_request() {
        let app = app();
        register_and_login(&app, "alice").await;
        let (status, body) = send(
            &app,
            request(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({ "screenName": "alice", "password": "secret2" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Screen name already in use");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let app = app();
        register_and_login(&app, "alice").await;
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "screenName": "alice", "password": "nope-nope" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let app = app();
        let (status, _) = send(&app, request("GET", "/api/users/me", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected_on_public_route() {
        let app = app();
        let (status, _) = send(&app, request("GET", "/api/users", Some("garbage"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, request("GET", "/api/users", None, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_me_update_and_follow_flow() {
        let app = app();
        let alice = register_and_login(&app, "alice").await;
        let bob = register_and_login(&app, "bob").await;

        let (_, bob_profile) = send(&app, request("GET", "/api/users/me", Some(&bob), None)).await;
        let bob_id = bob_profile["userid"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            request(
                "POST",
                &format!("/api/users/{bob_id}/follow"),
                Some(&alice),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (status, me) = send(
            &app,
            request(
                "PUT",
                "/api/users/me",
                Some(&alice),
                Some(json!({ "bio": "rustacean" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["bio"], "rustacean");
        assert_eq!(me["followingIds"], json!([bob_id]));
        assert_eq!(me["followingCount"], 1);

        let (_, bob_public) = send(
            &app,
            request("GET", &format!("/api/users/{bob_id}"), None, None),
        )
        .await;
        assert_eq!(bob_public["followersCount"], 1);
    }

    #[tokio::test]
    async fn test_self_follow_is_bad_request() {
        let app = app();
        let alice = register_and_login(&app, "alice").await;
        let (_, me) = send(&app, request("GET", "/api/users/me", Some(&alice), None)).await;
        let id = me["userid"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            request("POST", &format!("/api/users/{id}/follow"), Some(&alice), None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "You cannot follow yourself");
    }

    #[tokio::test]
    async fn test_delete_me() {
        let app = app();
        let alice = register_and_login(&app, "alice").await;

        let (status, _) = send(&app, request("DELETE", "/api/users/me", Some(&alice), None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, request("GET", "/api/users/me", Some(&alice), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Authenticated user not found");
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let app = app();
        let (status, body) = send(&app, request("GET", "/api/users/42", None, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found with id: 42");
    }

    #[tokio::test]
    async fn test_malformed_user_id_is_problem_json() {
        let app = app();
        let (status, body) = send(&app, request("GET", "/api/users/abc", None, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["title"], "Bad Request");
        assert!(body["detail"].as_str().unwrap().contains("abc"));
    }
}
