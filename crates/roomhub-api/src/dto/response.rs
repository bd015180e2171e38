//! Response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roomhub_auth::jwt::TokenPair;
use roomhub_core::types::pagination::PageResponse;
use roomhub_entity::booking::Booking;
use roomhub_entity::room::Room;
use roomhub_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Items in this page.
    pub items: Vec<T>,
    /// Current page (1-based).
    pub page: u64,
    /// Items per page.
    pub page_size: u64,
    /// Total item count.
    pub total_items: u64,
    /// Total pages.
    pub total_pages: u64,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Maps a domain page into a response page.
    pub fn from_page<S: Serialize>(page: PageResponse<S>, f: impl Fn(S) -> T) -> Self {
        Self {
            items: page.items.into_iter().map(f).collect(),
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Login and refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info.
    pub user: UserResponse,
}

impl LoginResponse {
    /// Builds the response from a token pair and its user.
    pub fn new(tokens: TokenPair, user: &User) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            user: UserResponse::from(user),
        }
    }
}

/// User summary for responses. Never exposes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role.
    pub role: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Room summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomResponse {
    /// Room ID.
    pub id: Uuid,
    /// Display number.
    pub number: i32,
    /// Nightly rate.
    pub price_per_day: Decimal,
    /// Maximum occupants.
    pub capacity: i32,
    /// Room category.
    pub room_type: String,
    /// Whether the room is free today.
    pub is_available: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            number: room.number,
            price_per_day: room.price_per_day,
            capacity: room.capacity,
            room_type: room.room_type.to_string(),
            is_available: room.is_available,
            created_at: room.created_at,
        }
    }
}

/// Booking summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Booked room.
    pub room_id: Uuid,
    /// First night (inclusive).
    pub start_date: NaiveDate,
    /// Check-out date (exclusive).
    pub end_date: NaiveDate,
    /// Number of nights.
    pub nights: i64,
    /// Total price.
    pub cost: Decimal,
    /// Whether the booking is canceled.
    pub canceled: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            room_id: booking.room_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            nights: (booking.end_date - booking.start_date).num_days(),
            cost: booking.cost,
            canceled: booking.canceled,
            created_at: booking.created_at,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
}
