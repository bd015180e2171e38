//! Auth handlers: register, login, refresh, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use roomhub_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, LoginResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    req.validate()?;

    let user = state
        .user_service
        .register(roomhub_service::user::service::RegisterRequest {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(UserResponse::from(&user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()?;

    let user = state
        .user_service
        .authenticate(&req.username, &req.password)
        .await?;

    let tokens = state
        .jwt_encoder
        .generate_token_pair(user.id, &user.role, &user.username)?;

    Ok(Json(ApiResponse::ok(LoginResponse::new(tokens, &user))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let claims = state.jwt_decoder.decode_refresh_token(&req.refresh_token)?;

    // Re-read the account so a role change or deletion takes effect at
    // the next refresh rather than at token expiry.
    let user = state
        .user_repo
        .find_by_id(claims.user_id())
        .await?
        .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

    let tokens = state
        .jwt_encoder
        .generate_token_pair(user.id, &user.role, &user.username)?;

    Ok(Json(ApiResponse::ok(LoginResponse::new(tokens, &user))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.user_service.get_user(&auth, auth.user_id).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(&user))))
}
