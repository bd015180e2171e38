//! Room entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::room_type::RoomType;

/// A bookable room in the catalog.
///
/// `is_available` is not a stored column: every room SELECT derives it from
/// a live overlap query against today's non-canceled bookings, so it can
/// never drift out of sync with the booking table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier (surrogate key).
    pub id: Uuid,
    /// Display number shown to guests (unique, positive).
    pub number: i32,
    /// Nightly rate.
    pub price_per_day: Decimal,
    /// Maximum number of occupants.
    pub capacity: i32,
    /// Room category.
    pub room_type: RoomType,
    /// Whether the room is free today (derived at query time).
    pub is_available: bool,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoom {
    /// Display number.
    pub number: i32,
    /// Nightly rate.
    pub price_per_day: Decimal,
    /// Maximum number of occupants.
    pub capacity: i32,
    /// Room category.
    pub room_type: RoomType,
}

/// Data for updating an existing room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoom {
    /// New display number.
    pub number: Option<i32>,
    /// New nightly rate.
    pub price_per_day: Option<Decimal>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New room category.
    pub room_type: Option<RoomType>,
}
