use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::auth::extractors::Principal;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::uploads::services::{store_linked_photo, store_photos, UploadItem};

const PRESIGN_TTL_SECS: u64 = 10 * 60;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/uploads", post(upload_photos))
        .route("/uploads/by-link", post(upload_by_link))
        .route("/uploads/*key", get(get_photo))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[derive(Debug, Deserialize)]
pub struct UploadByLinkRequest {
    pub link: String,
}

/// POST /uploads (multipart, field `photos`/`photos[]`). Returns the stable
/// blob keys; clients pass these back as listing photo references.
#[instrument(skip(state, mp))]
pub async fn upload_photos(
    State(state): State<AppState>,
    principal: Principal,
    mut mp: Multipart,
) -> ApiResult<(StatusCode, Json<Vec<String>>)> {
    let mut photos: Vec<UploadItem> = Vec::new();
    loop {
        let field = match mp.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(ApiError::Validation(format!("malformed multipart: {}", e))),
        };
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("photos") || name.as_deref() == Some("photos[]") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let body = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(e.to_string()))?;
            photos.push(UploadItem { body, content_type });
        }
    }
    if photos.is_empty() {
        return Err(ApiError::Validation("photos[] is required".into()));
    }

    let keys = store_photos(&state, principal.id, photos).await?;
    Ok((StatusCode::CREATED, Json(keys)))
}

/// POST /uploads/by-link. Downloads the linked image into the blob store
/// and returns its stable key.
#[instrument(skip(state, payload))]
pub async fn upload_by_link(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<UploadByLinkRequest>,
) -> ApiResult<(StatusCode, Json<String>)> {
    let key = store_linked_photo(&state, principal.id, &payload.link).await?;
    Ok((StatusCode::CREATED, Json(key)))
}

/// 302 to a short-lived presigned URL for the stored object.
#[instrument(skip(state))]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let url = state.storage.presign_get(&key, PRESIGN_TTL_SECS).await?;
    Ok(Redirect::temporary(&url))
}
