pub mod auth;
pub mod datasets;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::error::AppError;

pub const SESSION_HEADER: &str = "x-session-token";

pub(crate) fn session_token(headers: &HeaderMap) -> Result<Uuid, AppError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid session token".to_string()))
}
