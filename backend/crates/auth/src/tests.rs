//! HTTP-level tests for the auth crate
//! Routers are driven with `oneshot` against the in-memory store.

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryAuthRepository;
    use crate::presentation::router::auth_router;

    pub const SECRET: &[u8] = b"test-secret-key-0123456789abcdef";

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::with_secret(SECRET).unwrap())
    }

    pub fn app() -> (Router, InMemoryAuthRepository, Arc<AuthConfig>) {
        let repo = InMemoryAuthRepository::new();
        let config = config();
        let router = auth_router(repo.clone(), config.clone());
        (router, repo, config)
    }

    pub async fn post_json(
        router: &Router,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        post_raw(router, uri, body.to_string()).await
    }

    pub async fn post_raw(
        router: &Router,
        uri: &str,
        body: String,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod register_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_register_returns_created_with_user_id() {
        let (router, repo, _) = app();

        let (status, body) = post_json(
            &router,
            "/register",
            json!({ "username": "alice", "password": "correct-horse" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert!(uuid::Uuid::parse_str(body["userId"].as_str().unwrap()).is_ok());
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_ignores_extra_fields() {
        let (router, _, _) = app();

        let (status, _) = post_json(
            &router,
            "/register",
            json!({ "username": "alice", "password": "correct-horse", "role": "admin" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts_case_insensitively() {
        let (router, repo, _) = app();

        let (first, _) = post_json(
            &router,
            "/register",
            json!({ "username": "alice", "password": "correct-horse" }),
        )
        .await;
        let (second, body) = post_json(
            &router,
            "/register",
            json!({ "username": "  ALICE ", "password": "another-password" }),
        )
        .await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["status"], 409);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_short_inputs_rejected_before_store() {
        let (router, repo, _) = app();

        let (status, _) = post_json(
            &router,
            "/register",
            json!({ "username": "al", "password": "correct-horse" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = post_json(
            &router,
            "/register",
            json!({ "username": "alice", "password": "short" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["title"], "Bad Request");

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (router, _, _) = app();

        let (status, _) = post_raw(&router, "/register", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(&router, "/register", json!({ "username": "alice" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn registered() -> (axum::Router, std::sync::Arc<crate::AuthConfig>, String) {
        let (router, _, config) = app();
        let (_, body) = post_json(
            &router,
            "/register",
            json!({ "username": "alice", "password": "correct-horse" }),
        )
        .await;
        let user_id = body["userId"].as_str().unwrap().to_string();
        (router, config, user_id)
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (router, config, user_id) = registered().await;

        let (status, body) = post_json(
            &router,
            "/login",
            json!({ "username": "Alice", "password": "correct-horse" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tokenType"], "Bearer");
        assert_eq!(body["expiresIn"], 3600);
        assert!(body["expiresAt"].is_string());

        let claims = config
            .signer
            .verify(body["accessToken"].as_str().unwrap())
            .unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_identical() {
        let (router, _, _) = registered().await;

        let wrong_password = post_json(
            &router,
            "/login",
            json!({ "username": "alice", "password": "wrong-password" }),
        )
        .await;
        let unknown_user = post_json(
            &router,
            "/login",
            json!({ "username": "mallory", "password": "wrong-password" }),
        )
        .await;
        let malformed_user = post_json(
            &router,
            "/login",
            json!({ "username": "x", "password": "wrong-password" }),
        )
        .await;

        assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(unknown_user, malformed_user);
    }
}

#[cfg(test)]
mod gate_tests {
    use super::support::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use axum::{Extension, Router, middleware};
    use chrono::{Duration, Utc};
    use kernel::id::UserId;
    use kernel::principal::Principal;
    use tower::ServiceExt;

    use crate::presentation::middleware::{AuthGateState, require_bearer};

    async fn whoami(Extension(principal): Extension<Principal>) -> String {
        principal.user_id.to_string()
    }

    fn protected() -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .route_layer(middleware::from_fn_with_state(
                AuthGateState::new(config()),
                require_bearer,
            ))
    }

    async fn call(authorization: Option<String>) -> (StatusCode, Option<String>, String) {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = protected()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, challenge, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler_with_principal() {
        let user_id = UserId::new();
        let token = config().signer.issue(&user_id.to_string()).unwrap().token;

        let (status, _, body) = call(Some(format!("Bearer {token}"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }

    #[tokio::test]
    async fn test_every_rejection_looks_the_same() {
        let expired = config()
            .signer
            .issue_at(&UserId::new().to_string(), Utc::now() - Duration::hours(2))
            .unwrap()
            .token;

        let missing = call(None).await;
        let wrong_scheme = call(Some("Basic YWxpY2U6cGFzcw==".to_string())).await;
        let garbage = call(Some("Bearer not.a.token".to_string())).await;
        let expired = call(Some(format!("Bearer {expired}"))).await;

        assert_eq!(missing.0, StatusCode::UNAUTHORIZED);
        assert_eq!(missing.1.as_deref(), Some("Bearer"));
        assert!(missing.2.contains("Authentication required"));
        assert_eq!(missing, wrong_scheme);
        assert_eq!(missing, garbage);
        assert_eq!(missing, expired);
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let other = crate::AuthConfig::with_secret(b"another-secret-key-0123456789abc").unwrap();
        let token = other.signer.issue(&UserId::new().to_string()).unwrap().token;

        let (status, _, _) = call(Some(format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
