use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod repo;
mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
