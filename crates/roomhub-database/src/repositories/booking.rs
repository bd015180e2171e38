//! Booking repository implementation.
//!
//! Creation and date updates run the conflict check and the write inside
//! a single transaction; the check alone would be a check-then-act race
//! between concurrent requests for the same room. The `bookings_no_overlap`
//! exclusion constraint rejects whatever a concurrent writer slips past
//! the in-transaction check, and that violation is reported as the same
//! validation failure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::booking::{Booking, NewBooking, StayInterval};

/// Failure message for an interval that collides with an existing booking.
pub const ROOM_ALREADY_BOOKED: &str = "Room is already booked for the specified dates";

/// Repository for booking CRUD, conflict checks, and cancellation.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking by id", e)
            })
    }

    /// List all bookings with pagination (staff view).
    pub async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count bookings", e)
            })?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings ORDER BY start_date DESC, created_at DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List one user's bookings with pagination.
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count user bookings", e)
            })?;

        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 \
             ORDER BY start_date DESC, created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user bookings", e)
        })?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Whether at least one non-canceled booking for `room_id` overlaps the
    /// candidate interval, optionally excluding one booking id (used when
    /// re-validating an in-place date update against itself).
    pub async fn has_conflict(
        &self,
        room_id: Uuid,
        interval: &StayInterval,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<bool> {
        has_conflict_on(&self.pool, room_id, interval, exclude_booking_id).await
    }

    /// Insert a new booking after re-checking the conflict invariant inside
    /// the insert transaction.
    pub async fn create(&self, new: &NewBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        if has_conflict_on(&mut *tx, new.room_id, &new.interval, None).await? {
            return Err(AppError::validation(ROOM_ALREADY_BOOKED));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, user_id, room_id, start_date, end_date, cost) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.room_id)
        .bind(new.interval.start_date())
        .bind(new.interval.end_date())
        .bind(new.cost)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match exclusion_violation(&e) {
            true => AppError::validation(ROOM_ALREADY_BOOKED),
            false => AppError::with_source(ErrorKind::Database, "Failed to create booking", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(booking)
    }

    /// Move a booking to a new interval, re-checking conflicts against all
    /// other bookings for the room. When `cost` is `None` the stored cost
    /// is kept unchanged. Returns `None` if the booking does not exist.
    pub async fn update_dates(
        &self,
        id: Uuid,
        interval: &StayInterval,
        cost: Option<Decimal>,
    ) -> AppResult<Option<Booking>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let current = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to lock booking for update", e)
        })?;

        let Some(current) = current else {
            return Ok(None);
        };

        if has_conflict_on(&mut *tx, current.room_id, interval, Some(id)).await? {
            return Err(AppError::validation(ROOM_ALREADY_BOOKED));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET \
                 start_date = $2, end_date = $3, \
                 cost = COALESCE($4, cost), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(interval.start_date())
        .bind(interval.end_date())
        .bind(cost)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match exclusion_violation(&e) {
            true => AppError::validation(ROOM_ALREADY_BOOKED),
            false => AppError::with_source(ErrorKind::Database, "Failed to update booking", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking update", e)
        })?;

        Ok(Some(booking))
    }

    /// Soft-cancel a booking. The guards mirror the lifecycle rules: only
    /// an active booking whose stay starts strictly after `today` can be
    /// canceled. Returns the canceled row, or `None` if no row matched the
    /// guards (the service distinguishes which precondition failed).
    pub async fn cancel(&self, id: Uuid, today: NaiveDate) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET canceled = TRUE, updated_at = now() \
             WHERE id = $1 AND NOT canceled AND start_date > $2 RETURNING *",
        )
        .bind(id)
        .bind(today)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))
    }

    /// Hard-delete a booking (staff only at the service layer).
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete booking", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

/// Half-open overlap predicate shared by the pool-level check and the
/// in-transaction re-check: `existing.start < candidate.end AND
/// existing.end > candidate.start`, over non-canceled rows only.
async fn has_conflict_on<'e, E>(
    executor: E,
    room_id: Uuid,
    interval: &StayInterval,
    exclude_booking_id: Option<Uuid>,
) -> AppResult<bool>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (\
             SELECT 1 FROM bookings \
             WHERE room_id = $1 AND NOT canceled \
               AND start_date < $3 AND end_date > $2 \
               AND ($4::uuid IS NULL OR id <> $4)\
         )",
    )
    .bind(room_id)
    .bind(interval.start_date())
    .bind(interval.end_date())
    .bind(exclude_booking_id)
    .fetch_one(executor)
    .await
    .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check for conflicts", e))
}

/// SQLSTATE 23P01: exclusion_violation (the overlap backstop constraint).
fn exclusion_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23P01")
}
