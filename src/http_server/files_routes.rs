//! File HTTP Routes
//!
//! Endpoints for the file lifecycle: upload, download, delete, rename, move.
//! Pure glue: every decision is delegated to the [`FileStore`] backend and
//! its errors are mapped onto status codes via [`StorageError::status_code`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::store::{FileStore, StorageError};

// ==================
// Shared State
// ==================

/// File state shared across handlers
#[derive(Debug)]
pub struct FilesState<S: FileStore> {
    pub store: S,
}

impl<S: FileStore> FilesState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub name: String,
    pub size: u64,
    pub stored_at: String,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct RenameResponse {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub name: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

// ==================
// File Routes
// ==================

/// Create file routes
pub fn files_routes<S: FileStore + 'static>(state: Arc<FilesState<S>>) -> Router {
    Router::new()
        .route("/upload", post(upload_handler::<S>))
        .route("/download/{*name}", get(download_handler::<S>))
        .route("/{*name}", delete(delete_handler::<S>))
        .route("/rename", post(rename_handler::<S>))
        .route("/move", post(move_handler::<S>))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn error_response(err: StorageError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code,
        }),
    )
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
            code: 400,
        }),
    )
}

// ==================
// Handlers
// ==================

async fn upload_handler<S: FileStore>(
    State(state): State<Arc<FilesState<S>>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), (StatusCode, Json<ErrorResponse>)> {
    // First file field wins; the original name only contributes its extension.
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(&e.to_string()))?
    {
        let original_name = field.file_name().unwrap_or("unnamed").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| bad_request(&e.to_string()))?;

        let name = state
            .store
            .store(&data, &original_name)
            .map_err(error_response)?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                name,
                size: data.len() as u64,
                stored_at: chrono::Utc::now().to_rfc3339(),
            }),
        ));
    }

    Err(bad_request("No file provided"))
}

async fn download_handler<S: FileStore>(
    State(state): State<Arc<FilesState<S>>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, HeaderMap, Bytes), (StatusCode, Json<ErrorResponse>)> {
    let data = state.store.load(&name).map_err(error_response)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "content-type",
        HeaderValue::from_static("application/octet-stream"),
    );
    let disposition = format!("attachment; filename=\"{}\"", name);
    headers.insert(
        "content-disposition",
        HeaderValue::from_str(&disposition).map_err(|_| {
            error_response(StorageError::InvalidInput(format!(
                "Name is not a valid header value: {}",
                name
            )))
        })?,
    );

    Ok((StatusCode::OK, headers, Bytes::from(data)))
}

async fn delete_handler<S: FileStore>(
    State(state): State<Arc<FilesState<S>>>,
    Path(name): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.store.delete(&name).map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn rename_handler<S: FileStore>(
    State(state): State<Arc<FilesState<S>>>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<RenameResponse>, (StatusCode, Json<ErrorResponse>)> {
    let name = state
        .store
        .rename(&request.from, &request.to)
        .map_err(error_response)?;

    Ok(Json(RenameResponse { name }))
}

async fn move_handler<S: FileStore>(
    State(state): State<Arc<FilesState<S>>>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, (StatusCode, Json<ErrorResponse>)> {
    let path = state
        .store
        .move_to(&request.name, &request.to)
        .map_err(error_response)?;

    Ok(Json(MoveResponse { path }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_status_mapping() {
        let (status, Json(body)) = error_response(StorageError::NotFound("x".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, 404);

        let (status, _) = error_response(StorageError::Conflict("x".into()));
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = error_response(StorageError::InvalidInput("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(StorageError::Io("x".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_serializes() {
        let (_, Json(body)) = error_response(StorageError::NotFound("gone.txt".into()));
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("gone.txt"));
        assert!(json.contains("404"));
    }
}
