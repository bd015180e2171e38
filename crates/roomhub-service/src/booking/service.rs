//! Booking lifecycle operations: create, list, update, cancel, delete.
//!
//! The lifecycle rules from the domain model:
//! * create requires a valid interval and no conflict, and always books
//!   for the acting user;
//! * cancel requires an active booking whose stay has not yet started;
//! * hard delete is staff-only;
//! * `cost` is fixed at creation and never recomputed implicitly.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use roomhub_auth::policy::{self, Action};
use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::{BookingRepository, RoomRepository};
use roomhub_entity::booking::{Booking, NewBooking, StayInterval};

use crate::context::RequestContext;

/// Handles the booking lifecycle.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Room repository, used to resolve the room and its rate.
    room_repo: Arc<RoomRepository>,
}

/// Data for creating a booking. The owner is always the acting user, so
/// booking on someone else's behalf is impossible by construction.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateBookingRequest {
    /// Room to book.
    pub room_id: Uuid,
    /// First night of the stay (inclusive).
    pub start_date: NaiveDate,
    /// Check-out date (exclusive).
    pub end_date: NaiveDate,
    /// Explicit total price (staff only). When absent the cost is
    /// computed as `nights * room.price_per_day`.
    pub cost: Option<Decimal>,
}

/// Data for updating a booking. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateBookingRequest {
    /// New first night.
    pub start_date: Option<NaiveDate>,
    /// New check-out date.
    pub end_date: Option<NaiveDate>,
    /// Explicit new total price (staff only).
    pub cost: Option<Decimal>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(booking_repo: Arc<BookingRepository>, room_repo: Arc<RoomRepository>) -> Self {
        Self {
            booking_repo,
            room_repo,
        }
    }

    /// Lists bookings: staff see every booking, guests only their own.
    pub async fn list_bookings(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Booking>, AppError> {
        if ctx.is_staff() {
            self.booking_repo.find_all(page).await
        } else {
            self.booking_repo.find_by_user(ctx.user_id, page).await
        }
    }

    /// Fetches a booking, visible to its owner and staff.
    pub async fn get_booking(&self, ctx: &RequestContext, id: Uuid) -> Result<Booking, AppError> {
        let booking = self.find_existing(id).await?;
        policy::owner_or_staff().authorize(
            Some(&ctx.actor()),
            Action::Read,
            Some(booking.user_id),
        )?;
        Ok(booking)
    }

    /// Creates a booking for the acting user.
    ///
    /// Interval validation happens before any conflict evaluation, so a
    /// zero-length or inverted interval fails with its own message and
    /// never reaches persistence. The conflict check itself runs inside
    /// the insert transaction in the repository.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        req: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        let interval = StayInterval::new(req.start_date, req.end_date)?;

        let room = self
            .room_repo
            .find_by_id(req.room_id)
            .await?
            .ok_or_else(|| AppError::validation("Room does not exist"))?;

        let cost = match req.cost {
            Some(_) if !ctx.is_staff() => {
                return Err(AppError::validation(
                    "Only staff may set an explicit booking cost",
                ));
            }
            Some(cost) => cost,
            None => interval.cost(room.price_per_day),
        };

        let booking = self
            .booking_repo
            .create(&NewBooking {
                user_id: ctx.user_id,
                room_id: room.id,
                interval,
                cost,
            })
            .await?;

        info!(
            booking_id = %booking.id,
            room_id = %room.id,
            user_id = %ctx.user_id,
            nights = interval.nights(),
            "Booking created"
        );

        Ok(booking)
    }

    /// Moves a booking to new dates and/or sets an explicit cost.
    ///
    /// The conflict re-check excludes the booking itself, so keeping or
    /// shrinking the current interval always succeeds. Date changes do
    /// not recompute the stored cost; staff may pass one explicitly.
    pub async fn update_booking(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateBookingRequest,
    ) -> Result<Booking, AppError> {
        let booking = self.find_existing(id).await?;
        policy::owner_or_staff().authorize(
            Some(&ctx.actor()),
            Action::Write,
            Some(booking.user_id),
        )?;

        if booking.canceled {
            return Err(AppError::validation("Cannot modify a canceled booking"));
        }
        if req.cost.is_some() && !ctx.is_staff() {
            return Err(AppError::validation(
                "Only staff may set an explicit booking cost",
            ));
        }

        let interval = StayInterval::new(
            req.start_date.unwrap_or(booking.start_date),
            req.end_date.unwrap_or(booking.end_date),
        )?;

        let updated = self
            .booking_repo
            .update_dates(id, &interval, req.cost)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))?;

        info!(booking_id = %id, "Booking updated");

        Ok(updated)
    }

    /// Soft-cancels a booking before its start date.
    pub async fn cancel_booking(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Booking, AppError> {
        let booking = self.find_existing(id).await?;
        policy::owner_or_staff().authorize(
            Some(&ctx.actor()),
            Action::Write,
            Some(booking.user_id),
        )?;

        if booking.canceled {
            return Err(AppError::validation("Booking already canceled"));
        }
        let today = Utc::now().date_naive();
        if booking.has_started(today) {
            return Err(AppError::validation(
                "Cannot cancel a booking that has already started",
            ));
        }

        // The conditional UPDATE re-applies both guards, so a concurrent
        // cancel or a day rollover between the checks and the write
        // cannot produce a second cancellation.
        let canceled = self
            .booking_repo
            .cancel(id, today)
            .await?
            .ok_or_else(|| AppError::conflict("Booking was modified concurrently"))?;

        info!(booking_id = %id, user_id = %ctx.user_id, "Booking canceled");

        Ok(canceled)
    }

    /// Hard-deletes a booking (staff only).
    pub async fn delete_booking(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let booking = self.find_existing(id).await?;
        policy::owner_or_staff().authorize(
            Some(&ctx.actor()),
            Action::Delete,
            Some(booking.user_id),
        )?;

        self.booking_repo.delete(id).await?;
        info!(booking_id = %id, "Booking deleted");
        Ok(())
    }

    async fn find_existing(&self, id: Uuid) -> Result<Booking, AppError> {
        self.booking_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking not found"))
    }
}
