//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use roomhub_auth::jwt::decoder::JwtDecoder;
use roomhub_auth::jwt::encoder::JwtEncoder;
use roomhub_auth::password::PasswordHasher;
use roomhub_core::config::AppConfig;
use roomhub_database::repositories::{BookingRepository, RoomRepository, UserRepository};
use roomhub_service::booking::BookingService;
use roomhub_service::room::RoomService;
use roomhub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,

    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Room repository
    pub room_repo: Arc<RoomRepository>,
    /// Booking repository
    pub booking_repo: Arc<BookingRepository>,

    /// User account service
    pub user_service: Arc<UserService>,
    /// Room catalog service
    pub room_service: Arc<RoomService>,
    /// Booking lifecycle service
    pub booking_service: Arc<BookingService>,
}
