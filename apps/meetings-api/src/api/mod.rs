//! HTTP routes of the meetings service

pub mod health;
pub mod meetings;

use axum::Router;

use crate::state::AppState;

/// All API routes, mounted at the root by `axum_helpers::create_router`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/meetings", meetings::router(state))
        .merge(health::router(state.clone()))
}
