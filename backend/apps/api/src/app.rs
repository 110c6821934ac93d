//! Router composition
//!
//! `/api/register` and `/api/login` are public; every `/api/products*`
//! route sits behind the bearer gate. `/health` is public.

use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use auth::domain::repository::UserRepository;
use auth::middleware::{AuthGateState, require_bearer};
use catalog::CatalogConfig;
use catalog::domain::repository::ProductRepository;

/// Build the full application router
pub fn build_app<U, P>(
    users: U,
    products: P,
    auth_config: Arc<AuthConfig>,
    catalog_config: CatalogConfig,
    frontend_origins: &[String],
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: ProductRepository + Clone + Send + Sync + 'static,
{
    let gate = AuthGateState::new(auth_config.clone());

    let protected = catalog::catalog_router(products, catalog_config)
        .route_layer(middleware::from_fn_with_state(gate, require_bearer));

    let api = auth::auth_router(users, auth_config).merge(protected);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors(frontend_origins))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::InMemoryAuthRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use catalog::InMemoryProductRepository;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"composition-test-secret-0123456789";

    fn app() -> Router {
        build_app(
            InMemoryAuthRepository::new(),
            InMemoryProductRepository::new(),
            Arc::new(AuthConfig::with_secret(SECRET).unwrap()),
            CatalogConfig::default(),
            &["http://localhost:3000".to_string()],
        )
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn login(app: &Router) -> String {
        let credentials = json!({ "username": "clerk", "password": "stock-room-key" });
        let (status, _) = call(app, "POST", "/api/register", None, Some(credentials.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(app, "POST", "/api/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::OK);
        body["accessToken"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let (status, body) = call(&app(), "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_products_require_token() {
        let app = app();

        for (method, uri) in [
            ("GET", "/api/products"),
            ("POST", "/api/products"),
            ("DELETE", "/api/products/00000000-0000-0000-0000-000000000000"),
        ] {
            let (status, body) = call(&app, method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["status"], 401);
        }

        let (status, _) = call(&app, "GET", "/api/products", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_gate_runs_before_body_parsing() {
        let app = app();

        let request = Request::builder()
            .method("POST")
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{broken"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_login_and_manage_products() {
        let app = app();
        let token = login(&app).await;

        let (status, created) = call(
            &app,
            "POST",
            "/api/products",
            Some(&token),
            Some(json!({ "name": "Pallet jack", "price": "349.00", "quantity": 2 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap();

        let (status, adjusted) = call(
            &app,
            "POST",
            &format!("/api/products/{id}/stock"),
            Some(&token),
            Some(json!({ "delta": -2 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(adjusted["quantity"], 0);

        let (status, list) = call(&app, "GET", "/api/products?search=pallet", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["totalItems"], 1);
        assert_eq!(list["items"][0]["id"], id);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = call(&app(), "GET", "/api/nothing-here", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
