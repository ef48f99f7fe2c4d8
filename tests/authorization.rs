//! Router-level behaviour of the authorization gate and the not-found fallback.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tower::ServiceExt;

use gallery_gate::app::{build_router, build_state};
use gallery_gate::config::{Config, JwtSecret};
use gallery_gate::services::auth::{IdentityClaim, TokenIssuer};

const AUTH_REQUIRED: &str = "Authentication required";
const NOT_FOUND: &str = "The requested resource does not exist";

#[fixture]
fn config() -> Config {
    Config::from_vars(|_| None).unwrap()
}

#[fixture]
fn app(config: Config) -> Router {
    build_router(build_state(&config), &config)
}

fn token_for(user_id: &str) -> String {
    TokenIssuer::new(&JwtSecret::DevelopmentFallback)
        .sign(&IdentityClaim::new(user_id))
        .unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

#[rstest]
#[tokio::test]
async fn missing_header_is_unauthorized(app: Router) {
    let (status, body) = send(app, Method::GET, "/users/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": AUTH_REQUIRED }));
}

#[rstest]
#[case("Basic dXNlcjpwYXNz")]
#[case("bearer token")]
#[case("Token abc")]
#[case("Bearertoken")]
#[tokio::test]
async fn wrong_scheme_is_unauthorized(app: Router, #[case] value: &str) {
    let (status, body) = send(app, Method::GET, "/users/me", Some(value)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": AUTH_REQUIRED }));
}

#[rstest]
#[tokio::test]
async fn invalid_tokens_get_the_missing_header_message(app: Router) {
    let wrong_secret = TokenIssuer::new(&JwtSecret::Production("another".to_string()))
        .sign(&IdentityClaim::new("u1"))
        .unwrap();
    let expired = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &json!({ "userId": "u1", "exp": Utc::now().timestamp() - 3600 }),
        &EncodingKey::from_secret(b"dev-secret"),
    )
    .unwrap();
    let valid = token_for("u1");
    let tampered = format!("{}x", valid);

    for token in [wrong_secret, expired, tampered, "garbage".to_string()] {
        let (status, body) = send(
            app.clone(),
            Method::GET,
            "/users/me",
            Some(&format!("Bearer {token}")),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": AUTH_REQUIRED }));
    }
}

#[rstest]
#[tokio::test]
async fn valid_token_attaches_identity(app: Router) {
    let token = token_for("5d8b8592978f8bd833ca8133");

    let (status, body) = send(
        app,
        Method::GET,
        "/users/me",
        Some(&format!("Bearer {token}")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "userId": "5d8b8592978f8bd833ca8133" }));
}

#[tokio::test]
async fn production_secret_is_used_in_production() {
    let config = Config::from_vars(|key| match key {
        "APP_ENV" => Some("production".to_string()),
        "JWT_SECRET" => Some("prod-secret".to_string()),
        _ => None,
    })
    .unwrap();
    let app = build_router(build_state(&config), &config);

    let prod_token = TokenIssuer::new(&config.jwt_secret)
        .sign(&IdentityClaim::new("u1"))
        .unwrap();
    let dev_token = token_for("u1");

    let (status, _) = send(
        app.clone(),
        Method::GET,
        "/users/me",
        Some(&format!("Bearer {prod_token}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app,
        Method::GET,
        "/users/me",
        Some(&format!("Bearer {dev_token}")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[tokio::test]
async fn health_is_public(app: Router) {
    let (status, body) = send(app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[rstest]
#[case(Method::GET, "/does-not-exist")]
#[case(Method::POST, "/cards/123/likes")]
#[case(Method::DELETE, "/")]
#[tokio::test]
async fn unknown_routes_are_not_found(app: Router, #[case] method: Method, #[case] uri: &str) {
    let (status, body) = send(app, method, uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": NOT_FOUND }));
}

#[rstest]
#[tokio::test]
async fn unknown_method_on_known_path_is_not_found(app: Router) {
    let token = token_for("u1");

    let (status, body) = send(
        app,
        Method::POST,
        "/users/me",
        Some(&format!("Bearer {token}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": NOT_FOUND }));
}

#[rstest]
#[tokio::test]
async fn responses_carry_a_request_id(app: Router) {
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

fn production_config(origins: &str) -> Config {
    Config::from_vars(|key| match key {
        "APP_ENV" => Some("production".to_string()),
        "JWT_SECRET" => Some("prod-secret".to_string()),
        "CORS_ALLOWED_ORIGINS" => Some(origins.to_string()),
        _ => None,
    })
    .unwrap()
}

async fn allowed_origin(app: Router, origin: &str) -> Option<String> {
    let response = app
        .oneshot(
            Request::get("/health")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[rstest]
#[tokio::test]
async fn development_cors_allows_any_origin(app: Router) {
    let allowed = allowed_origin(app, "http://localhost:5173").await;

    assert_eq!(allowed.as_deref(), Some("*"));
}

#[tokio::test]
async fn production_cors_echoes_only_allowlisted_origins() {
    let config = production_config("https://gallery.example, https://admin.gallery.example");
    let app = build_router(build_state(&config), &config);

    let allowed = allowed_origin(app.clone(), "https://admin.gallery.example").await;
    assert_eq!(allowed.as_deref(), Some("https://admin.gallery.example"));

    assert_eq!(allowed_origin(app.clone(), "https://evil.example").await, None);
    assert_eq!(allowed_origin(app, "https://gallery.example.evil").await, None);
}

#[tokio::test]
async fn production_cors_with_empty_allowlist_allows_nobody() {
    let config = production_config("");
    let app = build_router(build_state(&config), &config);

    assert_eq!(allowed_origin(app, "https://gallery.example").await, None);
}

#[tokio::test]
async fn wildcard_entry_never_matches_as_an_origin() {
    let mut config = production_config("https://gallery.example");
    config.cors_allowed_origins.push("*".to_string());
    let app = build_router(build_state(&config), &config);

    assert_eq!(allowed_origin(app.clone(), "https://evil.example").await, None);
    assert_eq!(
        allowed_origin(app, "https://gallery.example").await.as_deref(),
        Some("https://gallery.example")
    );
}
