use uuid::Uuid;

use crate::auth::extractors::Principal;
use crate::error::{ApiError, ApiResult};

/// A persisted resource with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Ownership gate applied before every mutation of an owned resource.
/// The check is re-derived from the verified principal on each call.
pub fn ensure_owner<R: Owned>(principal: &Principal, resource: &R) -> ApiResult<()> {
    if resource.owner_id() != principal.id {
        return Err(ApiError::Forbidden);
    }
    Ok(())
}
