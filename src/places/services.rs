use crate::error::{ApiError, ApiResult};
use crate::places::dto::PlaceFields;

pub(crate) fn validate_fields(f: &PlaceFields) -> ApiResult<()> {
    if f.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if f.max_guests < 1 {
        return Err(ApiError::Validation("max_guests must be at least 1".into()));
    }
    if f.price < 0.0 {
        return Err(ApiError::Validation("price must not be negative".into()));
    }
    Ok(())
}
