//! Booking lifecycle handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::dto::request::{CreateBookingRequest, UpdateBookingRequest};
use crate::dto::response::{ApiResponse, BookingResponse, PaginatedResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/bookings
///
/// Staff see every booking; everyone else sees only their own.
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<BookingResponse>>>, ApiError> {
    let page = pagination.into_page_request();
    let bookings = state.booking_service.list_bookings(&auth, &page).await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(
        bookings,
        BookingResponse::from,
    ))))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.booking_service.get_booking(&auth, id).await?;

    Ok(Json(ApiResponse::ok(BookingResponse::from(booking))))
}

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), ApiError> {
    let booking = state
        .booking_service
        .create_booking(
            &auth,
            roomhub_service::booking::service::CreateBookingRequest {
                room_id: req.room_id,
                start_date: req.start_date,
                end_date: req.end_date,
                cost: req.cost,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(BookingResponse::from(booking))),
    ))
}

/// PATCH /api/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state
        .booking_service
        .update_booking(
            &auth,
            id,
            roomhub_service::booking::service::UpdateBookingRequest {
                start_date: req.start_date,
                end_date: req.end_date,
                cost: req.cost,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(BookingResponse::from(booking))))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let booking = state.booking_service.cancel_booking(&auth, id).await?;

    Ok(Json(ApiResponse::ok(BookingResponse::from(booking))))
}

/// DELETE /api/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.booking_service.delete_booking(&auth, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
