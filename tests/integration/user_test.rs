//! Integration tests for user profiles and ownership rules.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_get_own_profile() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user_id = app.create_test_user("selfie", "password123", "guest").await;
    let token = app.login("selfie", "password123").await;

    let response = app
        .request("GET", &format!("/api/users/{user_id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["username"], "selfie");
    assert!(response.data().get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_other_profile_forbidden_for_guests() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let target_id = app.create_test_user("target", "password123", "guest").await;
    app.create_test_user("snoop", "password123", "guest").await;
    app.create_test_user("deskstaff", "password123", "staff")
        .await;

    let snoop_token = app.login("snoop", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/users/{target_id}"),
            None,
            Some(&snoop_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let staff_token = app.login("deskstaff", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/users/{target_id}"),
            None,
            Some(&staff_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_own_email() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user_id = app.create_test_user("mutable", "password123", "guest").await;
    let token = app.login("mutable", "password123").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(serde_json::json!({ "email": "new@example.com" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["email"], "new@example.com");
}

#[tokio::test]
async fn test_update_email_conflict() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("holder", "password123", "guest").await;
    let user_id = app.create_test_user("wanter", "password123", "guest").await;
    let token = app.login("wanter", "password123").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(serde_json::json!({ "email": "holder@test.com" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_password_change_allows_new_login() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user_id = app
        .create_test_user("rotator", "oldpassword1", "guest")
        .await;
    let token = app.login("rotator", "oldpassword1").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/users/{user_id}"),
            Some(serde_json::json!({ "password": "newpassword1" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "rotator",
                "password": "newpassword1",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "rotator",
                "password": "oldpassword1",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_endpoints() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");

    let response = app.request("GET", "/api/health/detailed", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["database"], "connected");
}
