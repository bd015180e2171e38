//! Integration tests for the room catalog and availability filtering.

use http::StatusCode;

use crate::helpers::{TestApp, days_from_now};

#[tokio::test]
async fn test_list_rooms_public() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_room(101, "100.00", 2).await;
    app.create_test_room(102, "150.00", 4).await;

    let response = app.request("GET", "/api/rooms", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total_items"], 2);
    // Ordered by number.
    assert_eq!(response.data()["items"][0]["number"], 101);
}

#[tokio::test]
async fn test_create_room_requires_admin() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("guest1", "password123", "guest").await;
    app.create_test_user("admin1", "password123", "admin").await;

    let body = serde_json::json!({
        "number": 201,
        "price_per_day": "120.00",
        "capacity": 2,
    });

    let anonymous = app.request("POST", "/api/rooms", Some(body.clone()), None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let guest_token = app.login("guest1", "password123").await;
    let as_guest = app
        .request("POST", "/api/rooms", Some(body.clone()), Some(&guest_token))
        .await;
    assert_eq!(as_guest.status, StatusCode::FORBIDDEN);

    let admin_token = app.login("admin1", "password123").await;
    let as_admin = app
        .request("POST", "/api/rooms", Some(body), Some(&admin_token))
        .await;
    assert_eq!(as_admin.status, StatusCode::CREATED, "{:?}", as_admin.body);
    assert_eq!(as_admin.data()["number"], 201);
    assert_eq!(as_admin.data()["room_type"], "standard");
    assert_eq!(as_admin.data()["is_available"], true);
}

#[tokio::test]
async fn test_create_room_duplicate_number() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("admin2", "password123", "admin").await;
    app.create_test_room(301, "90.00", 2).await;
    let token = app.login("admin2", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/rooms",
            Some(serde_json::json!({
                "number": 301,
                "price_per_day": "95.00",
                "capacity": 3,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_room() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_user("admin3", "password123", "admin").await;
    let room_id = app.create_test_room(401, "80.00", 2).await;
    let token = app.login("admin3", "password123").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/rooms/{room_id}"),
            Some(serde_json::json!({ "capacity": 3, "room_type": "deluxe" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["capacity"], 3);
    assert_eq!(response.data()["room_type"], "deluxe");
    // Unchanged fields keep their values.
    assert_eq!(response.data()["number"], 401);

    let response = app
        .request(
            "DELETE",
            &format!("/api/rooms/{room_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/rooms/{room_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_availability_window_excludes_booked_room() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user_id = app.create_test_user("booker", "password123", "guest").await;
    let booked = app.create_test_room(501, "100.00", 2).await;
    app.create_test_room(502, "100.00", 2).await;

    app.insert_booking(user_id, booked, days_from_now(10), days_from_now(15))
        .await;

    // Overlapping window: only the free room remains.
    let path = format!(
        "/api/rooms?start_date={}&end_date={}",
        days_from_now(12),
        days_from_now(14)
    );
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total_items"], 1);
    assert_eq!(response.data()["items"][0]["number"], 502);

    // Adjacent window (checkout day = existing check-in): both rooms free.
    let path = format!(
        "/api/rooms?start_date={}&end_date={}",
        days_from_now(5),
        days_from_now(10)
    );
    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.data()["total_items"], 2);
}

#[tokio::test]
async fn test_availability_window_requires_both_dates() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let path = format!("/api/rooms?start_date={}", days_from_now(5));
    let response = app.request("GET", &path, None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_room_filters() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    app.create_test_room(601, "50.00", 1).await;
    app.create_test_room(602, "150.00", 4).await;

    let response = app
        .request("GET", "/api/rooms?min_capacity=2", None, None)
        .await;
    assert_eq!(response.data()["total_items"], 1);
    assert_eq!(response.data()["items"][0]["number"], 602);

    let response = app
        .request("GET", "/api/rooms?max_price=100", None, None)
        .await;
    assert_eq!(response.data()["total_items"], 1);
    assert_eq!(response.data()["items"][0]["number"], 601);
}

#[tokio::test]
async fn test_is_available_reflects_todays_booking() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let user_id = app
        .create_test_user("occupant", "password123", "guest")
        .await;
    let room_id = app.create_test_room(701, "100.00", 2).await;

    // Stay covering today.
    app.insert_booking(user_id, room_id, days_from_now(-1), days_from_now(2))
        .await;

    let response = app
        .request("GET", &format!("/api/rooms/{room_id}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_available"], false);
}
