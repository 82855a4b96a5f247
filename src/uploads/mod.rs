use axum::Router;

use crate::state::AppState;

pub mod handlers;
mod services;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
