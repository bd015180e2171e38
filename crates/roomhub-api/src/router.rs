//! Route definitions for the RoomHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(room_routes())
        .merge(booking_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: register, login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/me", get(handlers::auth::me))
}

/// User profile endpoints
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", patch(handlers::user::update_user))
}

/// Room catalog CRUD
fn room_routes() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(handlers::room::list_rooms))
        .route("/rooms", post(handlers::room::create_room))
        .route("/rooms/{id}", get(handlers::room::get_room))
        .route("/rooms/{id}", patch(handlers::room::update_room))
        .route("/rooms/{id}", delete(handlers::room::delete_room))
}

/// Booking lifecycle endpoints
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(handlers::booking::list_bookings))
        .route("/bookings", post(handlers::booking::create_booking))
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route("/bookings/{id}", patch(handlers::booking::update_booking))
        .route("/bookings/{id}", delete(handlers::booking::delete_booking))
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
