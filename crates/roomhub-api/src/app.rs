//! Application builder: wires repositories, services, and state into an
//! Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use roomhub_auth::jwt::decoder::JwtDecoder;
use roomhub_auth::jwt::encoder::JwtEncoder;
use roomhub_auth::password::PasswordHasher;
use roomhub_core::config::AppConfig;
use roomhub_core::error::AppError;
use roomhub_database::repositories::{BookingRepository, RoomRepository, UserRepository};
use roomhub_service::booking::BookingService;
use roomhub_service::room::RoomService;
use roomhub_service::user::UserService;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Constructs the application state from configuration and a database
/// pool. Shared with the integration tests.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let room_repo = Arc::new(RoomRepository::new(db_pool.clone()));
    let booking_repo = Arc::new(BookingRepository::new(db_pool.clone()));

    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        config.auth.password_min_length,
    ));
    let room_service = Arc::new(RoomService::new(Arc::clone(&room_repo)));
    let booking_service = Arc::new(BookingService::new(
        Arc::clone(&booking_repo),
        Arc::clone(&room_repo),
    ));

    AppState {
        config: Arc::new(config),
        db_pool,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        user_repo,
        room_repo,
        booking_repo,
        user_service,
        room_service,
        booking_service,
    }
}

/// Runs the RoomHub server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = build_state(config, db_pool);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("RoomHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install Ctrl+C handler");
    }
    tracing::info!("Shutdown signal received");
}
