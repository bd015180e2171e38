//! `AuthUser` extractor: pulls the JWT from the Authorization header,
//! validates it, and injects the request context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use roomhub_core::error::AppError;
use roomhub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Like `AuthUser`, but missing credentials yield `None` instead of a
/// rejection. Invalid credentials are still rejected, so a caller with
/// a bad token never falls through to the anonymous path.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        Ok(AuthUser(decode_context(state, token)?))
    }
}

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(OptionalAuthUser(Some(decode_context(state, token)?))),
            None => Ok(OptionalAuthUser(None)),
        }
    }
}

/// Extracts the Bearer token, if an Authorization header is present.
fn bearer_token(parts: &Parts) -> Result<Option<&str>, ApiError> {
    let Some(header) = parts.headers.get("authorization") else {
        return Ok(None);
    };

    let header = header
        .to_str()
        .map_err(|_| AppError::authentication("Invalid Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

    Ok(Some(token))
}

fn decode_context(state: &AppState, token: &str) -> Result<RequestContext, ApiError> {
    let claims = state.jwt_decoder.decode_access_token(token)?;
    Ok(RequestContext::new(
        claims.user_id(),
        claims.role,
        claims.username,
    ))
}
