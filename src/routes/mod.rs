//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser editor posts scene snapshots and recording requests here.
//! CORS is open so the editor can be served from a different origin
//! during development.

pub mod record;
pub mod scene;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/save", post(scene::save))
        .route("/api/record", post(record::start))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
