//! Scene store route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use canvas::doc::SceneSnapshot;
use serde_json::{Value, json};

use crate::services::store;
use crate::state::AppState;

/// `POST /api/save`: replace the stored scene with the posted snapshot.
pub async fn save(
    State(state): State<AppState>,
    Json(snapshot): Json<SceneSnapshot>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match store::save_scene(&state.config, &snapshot).await {
        Ok(_) => Ok(Json(json!({ "success": true }))),
        Err(e) => {
            tracing::error!(error = %e, "scene save failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false, "error": e.to_string() }))))
        }
    }
}

#[cfg(test)]
#[path = "scene_test.rs"]
mod tests;
