mod common;

use api::auth::TokenIssuer;
use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{
    get, json_request, raw_json_request, setup, ADMIN_USER, JWT_SECRET,
};

#[tokio::test]
async fn test_login_with_valid_credentials() {
    // Arrange
    let app = setup().await;

    // Act
    let token = app.login().await;
    let (status, body) = app.send(get("/api/admin", Some(&token))).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "Admin panel active");
    assert_eq!(body["user"]["username"], ADMIN_USER);
    assert_eq!(body["info"]["eventCount"], 0);
    assert!(body["info"]["tokenExpiresAt"].is_string());
}

#[tokio::test]
async fn test_login_with_invalid_credentials() {
    let app = setup().await;

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "username": ADMIN_USER, "password": "wrong" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_without_username() {
    let app = setup().await;

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "password": common::ADMIN_PASSWORD }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_malformed_body() {
    let app = setup().await;

    let (status, body) = app
        .send(raw_json_request(Method::POST, "/api/login", None, "{not json"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Malformed JSON body.");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup().await;

    let (admin_status, admin_body) = app.send(get("/api/admin", None)).await;
    let (create_status, _) = app
        .send(json_request(
            Method::POST,
            "/api/events",
            None,
            json!({ "title": "T" }),
        ))
        .await;

    assert_eq!(admin_status, StatusCode::UNAUTHORIZED);
    assert!(admin_body["error"].is_string());
    assert_eq!(create_status, StatusCode::UNAUTHORIZED);
    assert!(app.list().await.is_empty());
}

#[tokio::test]
async fn test_invalid_token_is_forbidden() {
    let app = setup().await;

    let (status, body) = app.send(get("/api/admin", Some("not-a-token"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_expired_token_is_forbidden() {
    // Arrange
    let app = setup().await;
    let token = TokenIssuer::new(JWT_SECRET, chrono::Duration::hours(-2))
        .issue(ADMIN_USER)
        .unwrap();

    // Act
    let (status, _) = app.send(get("/api/admin", Some(&token))).await;

    // Assert
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_expired_seconds_ago_is_forbidden() {
    let app = setup().await;
    let token = TokenIssuer::new(JWT_SECRET, chrono::Duration::seconds(-30))
        .issue(ADMIN_USER)
        .unwrap();

    let (status, body) = app.send(get("/api/admin", Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_forbidden() {
    let app = setup().await;
    let token = TokenIssuer::new("another-secret", chrono::Duration::hours(2))
        .issue(ADMIN_USER)
        .unwrap();

    let (status, _) = app.send(get("/api/admin", Some(&token))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
