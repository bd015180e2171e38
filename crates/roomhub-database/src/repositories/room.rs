//! Room repository implementation.
//!
//! Every room SELECT derives `is_available` from a live overlap query
//! against today's non-canceled bookings instead of reading a stored
//! flag, so availability can never drift out of sync with the booking
//! table.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::booking::StayInterval;
use roomhub_entity::room::{CreateRoom, Room, RoomType, UpdateRoom};

/// Computed column appended to every room SELECT.
const AVAILABILITY_COLUMN: &str = "NOT EXISTS (\
     SELECT 1 FROM bookings b \
     WHERE b.room_id = r.id AND NOT b.canceled \
       AND b.start_date <= $1 AND b.end_date > $1\
     ) AS is_available";

/// Filters for the room listing endpoint.
///
/// When `window` is set, rooms with at least one conflicting non-canceled
/// booking in that interval are excluded from the result.
#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    /// Exact display number.
    pub number: Option<i32>,
    /// Exact room category.
    pub room_type: Option<RoomType>,
    /// Minimum capacity.
    pub min_capacity: Option<i32>,
    /// Maximum nightly rate.
    pub max_price: Option<Decimal>,
    /// Requested stay window for availability filtering.
    pub window: Option<StayInterval>,
}

/// Repository for room CRUD and availability queries.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        let query = format!("SELECT r.*, {AVAILABILITY_COLUMN} FROM rooms r WHERE r.id = $2");
        sqlx::query_as::<_, Room>(&query)
            .bind(today())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room by id", e))
    }

    /// List rooms matching the filter, excluding rooms that have a
    /// conflicting booking in the requested window (half-open overlap:
    /// `existing.start < window.end AND existing.end > window.start`).
    pub async fn find_filtered(
        &self,
        filter: &RoomFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        let (window_start, window_end) = match &filter.window {
            Some(w) => (Some(w.start_date()), Some(w.end_date())),
            None => (None, None),
        };

        const MATCH_CLAUSE: &str = "($2::integer IS NULL OR r.number = $2) \
             AND ($3::room_type IS NULL OR r.room_type = $3) \
             AND ($4::integer IS NULL OR r.capacity >= $4) \
             AND ($5::numeric IS NULL OR r.price_per_day <= $5) \
             AND ($6::date IS NULL OR NOT EXISTS (\
                 SELECT 1 FROM bookings b \
                 WHERE b.room_id = r.id AND NOT b.canceled \
                   AND b.start_date < $7 AND b.end_date > $6))";

        let count_query = format!("SELECT COUNT(*) FROM rooms r WHERE {MATCH_CLAUSE}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(today())
            .bind(filter.number)
            .bind(filter.room_type)
            .bind(filter.min_capacity)
            .bind(filter.max_price)
            .bind(window_start)
            .bind(window_end)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))?;

        let list_query = format!(
            "SELECT r.*, {AVAILABILITY_COLUMN} FROM rooms r \
             WHERE {MATCH_CLAUSE} ORDER BY r.number LIMIT $8 OFFSET $9"
        );
        let rooms = sqlx::query_as::<_, Room>(&list_query)
            .bind(today())
            .bind(filter.number)
            .bind(filter.room_type)
            .bind(filter.min_capacity)
            .bind(filter.max_price)
            .bind(window_start)
            .bind(window_end)
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new room and return the stored row.
    pub async fn create(&self, room: &CreateRoom) -> AppResult<Room> {
        let query = format!(
            "WITH inserted AS (\
                 INSERT INTO rooms (id, number, price_per_day, capacity, room_type) \
                 VALUES ($2, $3, $4, $5, $6) RETURNING *\
             ) SELECT r.*, {AVAILABILITY_COLUMN} FROM inserted r"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(today())
            .bind(Uuid::new_v4())
            .bind(room.number)
            .bind(room.price_per_day)
            .bind(room.capacity)
            .bind(room.room_type)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                true => AppError::validation("A room with this number already exists"),
                false => AppError::with_source(ErrorKind::Database, "Failed to create room", e),
            })
    }

    /// Apply a partial update; `None` fields are left unchanged.
    pub async fn update(&self, id: Uuid, update: &UpdateRoom) -> AppResult<Option<Room>> {
        let query = format!(
            "WITH updated AS (\
                 UPDATE rooms SET \
                     number = COALESCE($3, number), \
                     price_per_day = COALESCE($4, price_per_day), \
                     capacity = COALESCE($5, capacity), \
                     room_type = COALESCE($6, room_type), \
                     updated_at = now() \
                 WHERE id = $2 RETURNING *\
             ) SELECT r.*, {AVAILABILITY_COLUMN} FROM updated r"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(today())
            .bind(id)
            .bind(update.number)
            .bind(update.price_per_day)
            .bind(update.capacity)
            .bind(update.room_type)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| match unique_violation(&e) {
                true => AppError::validation("A room with this number already exists"),
                false => AppError::with_source(ErrorKind::Database, "Failed to update room", e),
            })
    }

    /// Hard-delete a room. Bookings cascade at the storage layer.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete room", e))?;
        Ok(result.rows_affected() > 0)
    }
}

/// SQLSTATE 23505: unique_violation.
fn unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
