#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use freeins_server::auth::{seed_admin, AdminSeed, TokenIssuer, DEFAULT_TOKEN_TTL};
use freeins_server::models::LocaleSet;
use freeins_server::{router, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const SECRET: &[u8] = b"integration-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin";

pub struct TestApp {
    pub app: Router,
    pub state: Arc<AppState>,
}

pub async fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    seed_admin(store.as_ref(), &AdminSeed::default(), 4)
        .await
        .expect("seed admin");

    let state = Arc::new(AppState {
        store,
        tokens: TokenIssuer::new(SECRET, DEFAULT_TOKEN_TTL),
        locales: LocaleSet::default(),
    });

    TestApp {
        app: router(state.clone()),
        state,
    }
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    let mut req = json_request(method, uri, body);
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().expect("header"),
    );
    req
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub async fn login_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token").to_owned()
}

pub async fn create_page(app: &Router, token: &str, locale: &str, slug: &str) -> Value {
    let (status, body) = send(
        app,
        authed_json_request(
            "POST",
            "/api/pages",
            token,
            json!({
                "title": format!("{slug} ({locale})"),
                "content": "<p>hello</p>",
                "slug": slug,
                "locale": locale,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}
