//! User profile handlers.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_user(&auth, id).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}

/// PATCH /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .user_service
        .update_user(
            &auth,
            id,
            roomhub_service::user::service::UpdateProfileRequest {
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
