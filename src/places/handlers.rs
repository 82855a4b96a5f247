use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth::extractors::Principal;
use crate::error::{ApiError, ApiResult};
use crate::ownership::ensure_owner;
use crate::places::{dto::PlaceFields, repo, repo::Place, services::validate_fields};
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(list_places))
        .route("/places/:id", get(get_place))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/places", post(create_place))
        .route("/places/:id", put(update_place))
        .route("/me/places", get(my_places))
}

/// Public, unrestricted read.
#[instrument(skip(state))]
pub async fn list_places(State(state): State<AppState>) -> ApiResult<Json<Vec<Place>>> {
    Ok(Json(repo::list_all(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Place>> {
    let place = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("place"))?;
    Ok(Json(place))
}

#[instrument(skip(state))]
pub async fn my_places(
    State(state): State<AppState>,
    principal: Principal,
) -> ApiResult<Json<Vec<Place>>> {
    Ok(Json(repo::list_by_owner(&state.db, principal.id).await?))
}

#[instrument(skip(state, fields))]
pub async fn create_place(
    State(state): State<AppState>,
    principal: Principal,
    Json(fields): Json<PlaceFields>,
) -> ApiResult<(StatusCode, Json<Place>)> {
    validate_fields(&fields)?;
    let place = repo::create(&state.db, principal.id, &fields).await?;
    info!(place_id = %place.id, owner_id = %principal.id, "place created");
    Ok((StatusCode::CREATED, Json(place)))
}

/// Loads the stored row first and gates the write on the ownership check;
/// a non-owner gets `Forbidden` and nothing is written.
#[instrument(skip(state, fields))]
pub async fn update_place(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(fields): Json<PlaceFields>,
) -> ApiResult<Json<Place>> {
    let existing = repo::get(&state.db, id)
        .await?
        .ok_or(ApiError::NotFound("place"))?;
    ensure_owner(&principal, &existing)?;
    validate_fields(&fields)?;

    let place = repo::update(&state.db, id, &fields).await?;
    info!(place_id = %place.id, owner_id = %principal.id, "place updated");
    Ok(Json(place))
}
