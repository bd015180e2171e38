//! Room catalog operations: listing with availability filtering and
//! admin-gated mutation.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use roomhub_auth::policy::{self, Action};
use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::RoomRepository;
use roomhub_database::repositories::room::RoomFilter;
use roomhub_entity::room::{CreateRoom, Room, UpdateRoom};

use crate::context::RequestContext;

/// Handles the room catalog. Reads are open to everyone; all writes are
/// gated by the admin-only policy.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Room repository.
    room_repo: Arc<RoomRepository>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(room_repo: Arc<RoomRepository>) -> Self {
        Self { room_repo }
    }

    /// Lists rooms matching the filter. When a stay window is present,
    /// rooms with a conflicting booking are excluded.
    pub async fn list_rooms(
        &self,
        filter: &RoomFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<Room>, AppError> {
        self.room_repo.find_filtered(filter, page).await
    }

    /// Fetches a single room.
    pub async fn get_room(&self, id: Uuid) -> Result<Room, AppError> {
        self.room_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))
    }

    /// Creates a room (admin only).
    pub async fn create_room(
        &self,
        ctx: Option<&RequestContext>,
        room: CreateRoom,
    ) -> Result<Room, AppError> {
        let actor = ctx.map(|c| c.actor());
        policy::admin_only_write().authorize(actor.as_ref(), Action::Write, None)?;

        validate_room_fields(
            Some(room.number),
            Some(room.price_per_day),
            Some(room.capacity),
        )?;

        let room = self.room_repo.create(&room).await?;
        info!(room_id = %room.id, number = room.number, "Room created");
        Ok(room)
    }

    /// Updates a room (admin only). `None` fields are left unchanged.
    pub async fn update_room(
        &self,
        ctx: Option<&RequestContext>,
        id: Uuid,
        update: UpdateRoom,
    ) -> Result<Room, AppError> {
        let actor = ctx.map(|c| c.actor());
        policy::admin_only_write().authorize(actor.as_ref(), Action::Write, None)?;

        validate_room_fields(update.number, update.price_per_day, update.capacity)?;

        let room = self
            .room_repo
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))?;

        info!(room_id = %room.id, "Room updated");
        Ok(room)
    }

    /// Deletes a room (admin only). Its bookings cascade away.
    pub async fn delete_room(
        &self,
        ctx: Option<&RequestContext>,
        id: Uuid,
    ) -> Result<(), AppError> {
        let actor = ctx.map(|c| c.actor());
        policy::admin_only_write().authorize(actor.as_ref(), Action::Delete, None)?;

        let deleted = self.room_repo.delete(id).await?;
        if !deleted {
            return Err(AppError::not_found("Room not found"));
        }

        info!(room_id = %id, "Room deleted");
        Ok(())
    }
}

fn validate_room_fields(
    number: Option<i32>,
    price_per_day: Option<Decimal>,
    capacity: Option<i32>,
) -> Result<(), AppError> {
    if let Some(number) = number {
        if number <= 0 {
            return Err(AppError::validation("Room number must be positive"));
        }
    }
    if let Some(price) = price_per_day {
        if price < Decimal::ZERO {
            return Err(AppError::validation("Price per day must not be negative"));
        }
    }
    if let Some(capacity) = capacity {
        if capacity < 1 {
            return Err(AppError::validation("Capacity must be at least 1"));
        }
    }
    Ok(())
}
