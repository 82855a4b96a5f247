use bytes::Bytes;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub struct UploadItem {
    pub body: Bytes,
    pub content_type: String,
}

pub(crate) fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

fn photo_key(user_id: Uuid, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("places/{}/{}.{}", user_id, Uuid::new_v4(), ext)
}

pub(crate) fn validate_link(link: &str) -> ApiResult<()> {
    if !(link.starts_with("http://") || link.starts_with("https://")) {
        return Err(ApiError::Validation(
            "link must be an http(s) URL".into(),
        ));
    }
    Ok(())
}

/// Stores each photo in the blob store and returns the stable keys. Listings
/// reference photos by these key strings only.
pub async fn store_photos(
    st: &AppState,
    user_id: Uuid,
    photos: Vec<UploadItem>,
) -> anyhow::Result<Vec<String>> {
    anyhow::ensure!(!photos.is_empty(), "no photos provided");

    let mut keys = Vec::with_capacity(photos.len());
    for photo in photos {
        let key = photo_key(user_id, &photo.content_type);
        st.storage
            .put_object(&key, photo.body, &photo.content_type)
            .await?;
        keys.push(key);
    }
    Ok(keys)
}

/// Downloads a linked image and stores it like any uploaded photo,
/// returning the stable key. Download failures surface as validation
/// errors; only the blob store itself is trusted.
pub async fn store_linked_photo(
    st: &AppState,
    user_id: Uuid,
    link: &str,
) -> ApiResult<String> {
    validate_link(link)?;

    let resp = reqwest::get(link)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| ApiError::Validation(format!("image download failed: {}", e)))?;

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let body = resp
        .bytes()
        .await
        .map_err(|e| ApiError::Validation(format!("image download failed: {}", e)))?;

    let key = photo_key(user_id, &content_type);
    st.storage.put_object(&key, body, &content_type).await?;
    Ok(key)
}
