use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::auth::extractors::Principal;
use crate::bookings::{
    dto::{Booking, BookingRequest, BookingWithPlace},
    repo,
    services::validate_booking,
};
use crate::error::{ApiError, ApiResult};
use crate::places;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings", get(list_bookings))
}

/// The booking is always bound to the verified principal; the referenced
/// place must exist at creation time.
#[instrument(skip(state, payload))]
pub async fn create_booking(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<BookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    validate_booking(&payload)?;

    places::repo::get(&state.db, payload.place)
        .await?
        .ok_or(ApiError::NotFound("place"))?;

    let booking = repo::create(&state.db, principal.id, &payload).await?;
    info!(booking_id = %booking.id, user_id = %principal.id, place_id = %booking.place_id,
          "booking created");
    Ok((StatusCode::CREATED, Json(booking)))
}

#[instrument(skip(state))]
pub async fn list_bookings(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<BookingWithPlace>>> {
    Ok(Json(repo::list_for_user(&state.db, principal.id).await?))
}
