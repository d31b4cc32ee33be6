mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn login_returns_token_for_seeded_admin() {
    let test = spawn_app().await;
    let (status, body) = send(
        &test.app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["name"], "Admin");
    assert!(body["user"].get("password").is_none());

    let user_id: Uuid = body["user"]["id"].as_str().unwrap().parse().unwrap();
    let claims = test
        .state
        .tokens
        .verify(body["token"].as_str().unwrap())
        .expect("token verifies");
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[tokio::test]
async fn wrong_password_is_401() {
    let test = spawn_app().await;
    let (status, body) = send(
        &test.app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn unknown_email_is_401() {
    let test = spawn_app().await;
    let (status, body) = send(
        &test.app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "nobody@example.com", "password": ADMIN_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_without_body_fields_is_400() {
    let test = spawn_app().await;
    let (status, body) = send(
        &test.app,
        json_request("POST", "/api/auth/login", json!({ "email": ADMIN_EMAIL })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let test = spawn_app().await;
    let stale = test
        .state
        .tokens
        .issue_at(Uuid::new_v4(), chrono::Utc::now() - chrono::Duration::days(2))
        .unwrap();

    let (status, body) = send(
        &test.app,
        authed_json_request("DELETE", &format!("/api/pages/{}", Uuid::new_v4()), &stale, json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn health_reports_store_backend() {
    let test = spawn_app().await;
    let (status, body) = send(&test.app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}
