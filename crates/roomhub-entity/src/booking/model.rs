//! Booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use roomhub_core::AppError;

use super::interval::StayInterval;

/// A reservation linking a user and a room to a half-open date interval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// Owning account.
    pub user_id: Uuid,
    /// Booked room.
    pub room_id: Uuid,
    /// First night of the stay (inclusive).
    pub start_date: NaiveDate,
    /// Check-out date (exclusive).
    pub end_date: NaiveDate,
    /// Total price, fixed at creation time.
    pub cost: Decimal,
    /// Soft-cancellation flag. Canceled bookings never conflict.
    pub canceled: bool,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// The booking's stay interval.
    ///
    /// Stored rows always satisfy `start_date < end_date` (enforced at
    /// creation and by a table constraint), so this cannot fail for data
    /// read from the database.
    pub fn interval(&self) -> Result<StayInterval, AppError> {
        StayInterval::new(self.start_date, self.end_date)
    }

    /// Whether the stay has begun (or passed) as of `today`.
    /// A booking can only be canceled before its start date.
    pub fn has_started(&self, today: NaiveDate) -> bool {
        self.start_date <= today
    }
}

/// Data required to insert a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    /// Owning account.
    pub user_id: Uuid,
    /// Booked room.
    pub room_id: Uuid,
    /// Validated stay interval.
    pub interval: StayInterval,
    /// Total price.
    pub cost: Decimal,
}
