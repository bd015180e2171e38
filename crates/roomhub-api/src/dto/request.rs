//! Request DTOs with validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use roomhub_core::error::AppError;
use roomhub_database::repositories::room::RoomFilter;
use roomhub_entity::booking::StayInterval;
use roomhub_entity::room::RoomType;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 3, max = 100, message = "Username must be 3-100 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New email.
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
}

/// Create room request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRoomRequest {
    /// Display number.
    #[validate(range(min = 1, message = "Room number must be positive"))]
    pub number: i32,
    /// Nightly rate.
    pub price_per_day: Decimal,
    /// Maximum occupants.
    #[validate(range(min = 1, message = "Capacity must be at least 1"))]
    pub capacity: i32,
    /// Room category; defaults to standard.
    #[serde(default)]
    pub room_type: RoomType,
}

/// Update room request (admin). `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    /// New display number.
    pub number: Option<i32>,
    /// New nightly rate.
    pub price_per_day: Option<Decimal>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New room category.
    pub room_type: Option<RoomType>,
}

/// Create booking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Room to book.
    pub room_id: uuid::Uuid,
    /// First night (inclusive).
    pub start_date: NaiveDate,
    /// Check-out date (exclusive).
    pub end_date: NaiveDate,
    /// Explicit total price (staff only).
    pub cost: Option<Decimal>,
}

/// Update booking request. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBookingRequest {
    /// New first night.
    pub start_date: Option<NaiveDate>,
    /// New check-out date.
    pub end_date: Option<NaiveDate>,
    /// Explicit new total price (staff only).
    pub cost: Option<Decimal>,
}

/// Query parameters for the room listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomListQuery {
    /// Exact display number. `room_name` is accepted as an alias because
    /// older clients send the display number under that key.
    #[serde(alias = "room_name")]
    pub number: Option<i32>,
    /// Exact room category.
    pub room_type: Option<RoomType>,
    /// Minimum capacity.
    pub min_capacity: Option<i32>,
    /// Maximum nightly rate.
    pub max_price: Option<Decimal>,
    /// Availability window start (requires `end_date`).
    pub start_date: Option<NaiveDate>,
    /// Availability window end (requires `start_date`).
    pub end_date: Option<NaiveDate>,
}

impl RoomListQuery {
    /// Converts the query into a repository filter, validating the
    /// optional availability window.
    pub fn into_filter(self) -> Result<RoomFilter, AppError> {
        let window = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(StayInterval::new(start, end)?),
            (None, None) => None,
            _ => {
                return Err(AppError::validation(
                    "Both start_date and end_date are required for availability filtering",
                ));
            }
        };

        Ok(RoomFilter {
            number: self.number,
            room_type: self.room_type,
            min_capacity: self.min_capacity,
            max_price: self.max_price,
            window,
        })
    }
}
