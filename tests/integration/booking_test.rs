//! Integration tests for the booking lifecycle: creation, conflicts,
//! cost computation, cancellation, and ownership rules.

use http::StatusCode;

use crate::helpers::{TestApp, days_from_now};

#[tokio::test]
async fn test_create_booking_computes_cost() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("coster", "password123", "guest").await;
    let room_id = app.create_test_room(101, "100.00", 2).await;
    let token = app.login("coster", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(10),
                "end_date": days_from_now(15),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    // 5 nights at 100.00 per night.
    assert_eq!(response.data()["nights"], 5);
    assert_eq!(response.data()["cost"], "500.00");
    assert_eq!(response.data()["canceled"], false);
}

#[tokio::test]
async fn test_overlapping_booking_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("first", "password123", "guest").await;
    app.create_test_user("second", "password123", "guest").await;
    let room_id = app.create_test_room(102, "100.00", 2).await;

    let first_token = app.login("first", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(10),
                "end_date": days_from_now(15),
            })),
            Some(&first_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let second_token = app.login("second", "password123").await;
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(12),
                "end_date": days_from_now(17),
            })),
            Some(&second_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_adjacent_booking_allowed() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user_id = app.create_test_user("adjacent", "password123", "guest").await;
    let room_id = app.create_test_room(103, "100.00", 2).await;
    app.insert_booking(user_id, room_id, days_from_now(10), days_from_now(15))
        .await;
    let token = app.login("adjacent", "password123").await;

    // Checks in on the earlier booking's checkout day.
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(15),
                "end_date": days_from_now(17),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.data()["nights"], 2);
    assert_eq!(response.data()["cost"], "200.00");
}

#[tokio::test]
async fn test_invalid_interval_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("invalid", "password123", "guest").await;
    let room_id = app.create_test_room(104, "100.00", 2).await;
    let token = app.login("invalid", "password123").await;

    // Zero-length stay.
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(10),
                "end_date": days_from_now(10),
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Inverted interval.
    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(15),
                "end_date": days_from_now(10),
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_explicit_cost_is_staff_only() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("cheapskate", "password123", "guest")
        .await;
    app.create_test_user("clerk", "password123", "staff").await;
    let room_id = app.create_test_room(105, "100.00", 2).await;

    let body = serde_json::json!({
        "room_id": room_id,
        "start_date": days_from_now(10),
        "end_date": days_from_now(12),
        "cost": "1.00",
    });

    let guest_token = app.login("cheapskate", "password123").await;
    let response = app
        .request("POST", "/api/bookings", Some(body.clone()), Some(&guest_token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let staff_token = app.login("clerk", "password123").await;
    let response = app
        .request("POST", "/api/bookings", Some(body), Some(&staff_token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["cost"], "1.00");
}

#[tokio::test]
async fn test_owner_visibility() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner_id = app.create_test_user("owner", "password123", "guest").await;
    app.create_test_user("peeper", "password123", "guest").await;
    app.create_test_user("manager", "password123", "staff").await;
    let room_id = app.create_test_room(106, "100.00", 2).await;
    let booking_id = app
        .insert_booking(owner_id, room_id, days_from_now(10), days_from_now(12))
        .await;

    let owner_token = app.login("owner", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/bookings/{booking_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let peeper_token = app.login("peeper", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/bookings/{booking_id}"),
            None,
            Some(&peeper_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Listing only shows the caller's own bookings.
    let response = app
        .request("GET", "/api/bookings", None, Some(&peeper_token))
        .await;
    assert_eq!(response.data()["total_items"], 0);

    // Staff see everything.
    let manager_token = app.login("manager", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/bookings/{booking_id}"),
            None,
            Some(&manager_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let response = app
        .request("GET", "/api/bookings", None, Some(&manager_token))
        .await;
    assert_eq!(response.data()["total_items"], 1);
}

#[tokio::test]
async fn test_cancel_booking() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner_id = app
        .create_test_user("canceler", "password123", "guest")
        .await;
    let room_id = app.create_test_room(107, "100.00", 2).await;
    let booking_id = app
        .insert_booking(owner_id, room_id, days_from_now(10), days_from_now(12))
        .await;
    let token = app.login("canceler", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["canceled"], true);

    // Second cancel fails.
    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_started_booking_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner_id = app.create_test_user("latecomer", "password123", "guest").await;
    let room_id = app.create_test_room(108, "100.00", 2).await;
    let booking_id = app
        .insert_booking(owner_id, room_id, days_from_now(-1), days_from_now(3))
        .await;
    let token = app.login("latecomer", "password123").await;

    let response = app
        .request(
            "POST",
            &format!("/api/bookings/{booking_id}/cancel"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_canceled_booking_frees_the_room() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("releaser", "password123", "guest").await;
    app.create_test_user("taker", "password123", "guest").await;
    let room_id = app.create_test_room(109, "100.00", 2).await;

    let releaser_token = app.login("releaser", "password123").await;
    let body = serde_json::json!({
        "room_id": room_id,
        "start_date": days_from_now(10),
        "end_date": days_from_now(15),
    });
    let created = app
        .request("POST", "/api/bookings", Some(body.clone()), Some(&releaser_token))
        .await;
    let booking_id = created.data()["id"].as_str().unwrap().to_string();

    app.request(
        "POST",
        &format!("/api/bookings/{booking_id}/cancel"),
        None,
        Some(&releaser_token),
    )
    .await;

    // Same interval now books cleanly for someone else.
    let taker_token = app.login("taker", "password123").await;
    let response = app
        .request("POST", "/api/bookings", Some(body), Some(&taker_token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_update_booking_dates() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("mover", "password123", "guest").await;
    let room_id = app.create_test_room(110, "100.00", 2).await;
    let token = app.login("mover", "password123").await;

    let created = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(10),
                "end_date": days_from_now(15),
            })),
            Some(&token),
        )
        .await;
    let booking_id = created.data()["id"].as_str().unwrap().to_string();

    // Shrinking the stay never conflicts with itself.
    let response = app
        .request(
            "PATCH",
            &format!("/api/bookings/{booking_id}"),
            Some(serde_json::json!({ "end_date": days_from_now(13) })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.data()["nights"], 3);
    // Cost is not recomputed on date changes.
    assert_eq!(response.data()["cost"], "500.00");
}

#[tokio::test]
async fn test_delete_booking_is_staff_only() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let owner_id = app.create_test_user("keeper", "password123", "guest").await;
    app.create_test_user("cleaner", "password123", "staff").await;
    let room_id = app.create_test_room(111, "100.00", 2).await;
    let booking_id = app
        .insert_booking(owner_id, room_id, days_from_now(10), days_from_now(12))
        .await;

    // Even the owner cannot hard-delete.
    let owner_token = app.login("keeper", "password123").await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/bookings/{booking_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let staff_token = app.login("cleaner", "password123").await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/bookings/{booking_id}"),
            None,
            Some(&staff_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_booking_requires_authentication() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let room_id = app.create_test_room(112, "100.00", 2).await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": room_id,
                "start_date": days_from_now(10),
                "end_date": days_from_now(12),
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_unknown_room_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("lost", "password123", "guest").await;
    let token = app.login("lost", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/bookings",
            Some(serde_json::json!({
                "room_id": uuid::Uuid::new_v4(),
                "start_date": days_from_now(10),
                "end_date": days_from_now(12),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
