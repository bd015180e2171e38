//! Room catalog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use roomhub_entity::room::{CreateRoom, UpdateRoom};

use crate::dto::request::{CreateRoomRequest, RoomListQuery, UpdateRoomRequest};
use crate::dto::response::{ApiResponse, PaginatedResponse, RoomResponse};
use crate::error::ApiError;
use crate::extractors::{OptionalAuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/rooms
///
/// Public listing with optional filters, including an availability
/// window (`start_date` + `end_date`) that excludes rooms with a
/// conflicting booking.
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<RoomResponse>>>, ApiError> {
    let filter = query.into_filter()?;
    let page = pagination.into_page_request();

    let rooms = state.room_service.list_rooms(&filter, &page).await?;

    Ok(Json(ApiResponse::ok(PaginatedResponse::from_page(
        rooms,
        RoomResponse::from,
    ))))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RoomResponse>>, ApiError> {
    let room = state.room_service.get_room(id).await?;

    Ok(Json(ApiResponse::ok(RoomResponse::from(room))))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    OptionalAuthUser(ctx): OptionalAuthUser,
    Json(req): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomResponse>>), ApiError> {
    req.validate()?;

    let room = state
        .room_service
        .create_room(
            ctx.as_ref(),
            CreateRoom {
                number: req.number,
                price_per_day: req.price_per_day,
                capacity: req.capacity,
                room_type: req.room_type,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(RoomResponse::from(room))),
    ))
}

/// PATCH /api/rooms/{id}
pub async fn update_room(
    State(state): State<AppState>,
    OptionalAuthUser(ctx): OptionalAuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<ApiResponse<RoomResponse>>, ApiError> {
    let room = state
        .room_service
        .update_room(
            ctx.as_ref(),
            id,
            UpdateRoom {
                number: req.number,
                price_per_day: req.price_per_day,
                capacity: req.capacity,
                room_type: req.room_type,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(RoomResponse::from(room))))
}

/// DELETE /api/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    OptionalAuthUser(ctx): OptionalAuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.room_service.delete_room(ctx.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}
