//! Integration tests for registration and the authentication flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_and_login() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["username"], "alice");
    assert_eq!(response.data()["role"], "guest");
    assert!(response.data().get("password_hash").is_none());

    let token = app.login("alice", "password123").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("taken", "password123", "guest").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "taken",
                "email": "other@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_short_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "shorty",
                "email": "shorty@example.com",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_invalid_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("bob", "password123", "guest").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "bob",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_authenticated() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("meuser", "password123", "admin").await;
    let token = app.login("meuser", "password123").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"], "meuser");
    assert_eq!(response.data()["role"], "admin");
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("refresher", "password123", "guest")
        .await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "refresher",
                "password": "password123",
            })),
            None,
        )
        .await;

    let refresh_token = login.data()["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.data()["access_token"].as_str().is_some());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("confused", "password123", "guest")
        .await;
    let access_token = app.login("confused", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refresh_token": access_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
