use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::{error::AppError, models::Session, AppState};

use super::session_token;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: Uuid,
    username: String,
    role: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state.auth.validate(&request.username, &request.password)?;
    let token = Uuid::new_v4();
    tracing::info!("Login for {} ({})", user.username, user.role);

    let response = LoginResponse {
        token,
        username: user.username.clone(),
        role: user.role.clone(),
    };
    state.sessions.lock().insert(token, Session { user, upload: None });
    Ok(Json(response))
}

async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = session_token(&headers)?;
    state.sessions.lock().remove(&token);
    Ok(Json(json!({})))
}
