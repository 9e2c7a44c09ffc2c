use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::UploadState,
    services::{
        analytics::{self, DatasetDescription, MetricsSummary},
        charts::{self, ChartKind, ChartSpec},
        storage,
        table::{self, Table},
    },
    AppState,
};

use super::session_token;

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/datasets/upload", post(upload_dataset))
        .route("/datasets/current", get(current_dataset))
        .route("/datasets/metrics", post(dataset_metrics))
        .route("/charts", post(render_chart))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    summary: MetricsSummary,
    json_path: String,
    csv_path: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    kind: ChartKind,
    spec: ChartSpec,
    #[serde(default)]
    seed: Option<u64>,
}

async fn upload_dataset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<DatasetDescription>, AppError> {
    let token = session_token(&headers)?;
    if !state.sessions.lock().contains_key(&token) {
        return Err(AppError::Unauthorized("Unknown session".to_string()));
    }

    let start = Instant::now();
    let mut payload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload.csv").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;
            payload = Some((filename, data));
        }
    }
    let (filename, data) =
        payload.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    if data.len() > state.config.max_file_size {
        return Err(AppError::InvalidInput(format!(
            "File exceeds the {} byte limit",
            state.config.max_file_size
        )));
    }
    tracing::info!("Received upload {} ({}KB)", filename, data.len() / 1024);

    let saved_path = storage::save_upload(&state.config, &filename, &data)?;
    let parsed: Table = table::read_table(&data)?;
    let description =
        analytics::describe(&parsed, &filename, &saved_path, state.config.preview_rows);
    tracing::info!(
        "Profiled {} rows x {} columns in {:?}",
        description.row_count,
        description.columns.len(),
        start.elapsed()
    );

    let mut sessions = state.sessions.lock();
    let session = sessions
        .get_mut(&token)
        .ok_or_else(|| AppError::Unauthorized("Unknown session".to_string()))?;
    session.upload = Some(UploadState {
        description: description.clone(),
        table: parsed,
    });

    Ok(Json(description))
}

async fn current_dataset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DatasetDescription>, AppError> {
    let token = session_token(&headers)?;
    let sessions = state.sessions.lock();
    let session = sessions
        .get(&token)
        .ok_or_else(|| AppError::Unauthorized("Unknown session".to_string()))?;
    let upload = session
        .upload
        .as_ref()
        .ok_or_else(|| AppError::InvalidInput("No dataset uploaded yet".to_string()))?;
    Ok(Json(upload.description.clone()))
}

async fn dataset_metrics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<MetricsResponse>, AppError> {
    let parsed = session_table(&state, &headers)?;

    let start = Instant::now();
    let summary = analytics::compute(&parsed);
    let json_path = storage::write_json(&state.config, "last_summary.json", &summary)?;
    let csv_path = storage::write_metrics_csv(&state.config, "numeric_summary.csv", &summary)?;
    tracing::info!(
        "Metrics for {} numeric columns in {:?}",
        summary.numeric_summary.len(),
        start.elapsed()
    );

    Ok(Json(MetricsResponse {
        summary,
        json_path,
        csv_path,
    }))
}

async fn render_chart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<ChartRequest>,
) -> Result<impl IntoResponse, AppError> {
    let parsed = session_table(&state, &headers)?;

    let start = Instant::now();
    let figure = charts::render(&parsed, request.kind, &request.spec, request.seed);
    let png = figure.to_png()?;
    tracing::info!("Rendered {:?} chart in {:?}", request.kind, start.elapsed());

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

// Clone the table out of the session so the lock is not held during compute
// or render.
fn session_table(state: &AppState, headers: &HeaderMap) -> Result<Table, AppError> {
    let token = session_token(headers)?;
    let sessions = state.sessions.lock();
    let session = sessions
        .get(&token)
        .ok_or_else(|| AppError::Unauthorized("Unknown session".to_string()))?;
    session
        .upload
        .as_ref()
        .map(|upload| upload.table.clone())
        .ok_or_else(|| AppError::InvalidInput("No dataset uploaded yet".to_string()))
}
