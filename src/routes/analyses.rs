use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, Query, State},
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::{AnalysisResult, CsvUpload},
    services::{
        analysis::progress,
        csv::{parse_document, validate_upload},
        store::new_file_id,
    },
    AppState,
};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;
const MAX_PROGRESS_TICKS: u32 = 20;

pub fn routes(max_file_size: usize) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/analyses", post(upload_csv))
        .route("/analyses/:file_id", get(get_analysis))
        .route("/analyses/:file_id/progress", get(get_progress))
        .layer(DefaultBodyLimit::max(max_file_size.saturating_add(MULTIPART_OVERHEAD)))
        .layer(cors)
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    ticks: Option<u32>,
}

struct UploadedFile {
    file_name: String,
    file_type: String,
    data: Bytes,
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit }
    } else {
        AppError::InvalidInput(err.body_text())
    }
}

async fn read_file_part(multipart: &mut Multipart, limit: usize) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let file_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        return Ok(UploadedFile {
            file_name,
            file_type,
            data,
        });
    }

    Err(AppError::InvalidInput("No file provided".to_string()))
}

async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let start = std::time::Instant::now();
    let limit = state.config.max_file_size;

    let file = read_file_part(&mut multipart, limit).await?;
    tracing::info!(
        "Received upload {:?} ({}, {}KB)",
        file.file_name,
        file.file_type,
        file.data.len() / 1024
    );

    validate_upload(&file.file_name, &file.file_type, file.data.len(), limit)?;

    let content = String::from_utf8_lossy(&file.data);
    let parsed = parse_document(&content, state.config.sample_rows);
    if parsed.headers.is_empty() {
        return Err(AppError::EmptyFile);
    }

    let upload = CsvUpload {
        file_name: file.file_name,
        file_type: file.file_type,
        headers: parsed.headers,
        sample_rows: parsed.sample_rows,
    };

    // Column profiling fans out over rayon; keep it off the async workers.
    let worker = Arc::clone(&state);
    let mut rng = state.request_rng();
    let result = tokio::task::spawn_blocking(move || {
        let file_id = new_file_id(worker.store.as_ref(), &mut rng);
        worker.analyzer.analyze(file_id, &upload, &mut rng)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))??;

    let file_id = result.file_id.clone();
    state.store.put(file_id.clone(), result);
    tracing::info!("Stored analysis {} in {:?}", file_id, start.elapsed());

    Ok((StatusCode::CREATED, Json(UploadResponse { file_id })))
}

async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .store
        .get(&file_id)
        .ok_or_else(|| AppError::NotFound(file_id))?;

    Ok(Json(result.as_ref().clone()))
}

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = state
        .store
        .get(&file_id)
        .ok_or_else(|| AppError::NotFound(file_id))?;

    let ticks = query.ticks.unwrap_or(1).min(MAX_PROGRESS_TICKS);
    let snapshot = progress::simulate(&result, ticks, &mut state.request_rng());

    Ok(Json(snapshot))
}
