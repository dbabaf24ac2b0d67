//! Render control route.
//!
//! The request body is loosely typed: every field is optional, and
//! `duration`/`fps` may arrive as numbers or numeric strings. Values that
//! aren't numbers fall back to the export defaults. `output` must be a
//! string; `null` means the default file name and any other type is
//! rejected by the extractor.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use canvas::bridge::RecordRequest;
use canvas::consts::{DEFAULT_EXPORT_DURATION, DEFAULT_EXPORT_FPS, DEFAULT_EXPORT_OUTPUT};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::services::store;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordBody {
    pub duration: Option<Value>,
    pub fps: Option<Value>,
    pub output: Option<String>,
}

impl RecordBody {
    /// Resolve the body into a request, filling defaults.
    #[must_use]
    pub fn into_request(self) -> RecordRequest {
        let duration = match self.duration.as_ref() {
            None => DEFAULT_EXPORT_DURATION,
            Some(raw) => number(raw).unwrap_or_else(|| {
                tracing::warn!(%raw, "non-numeric duration; using default");
                DEFAULT_EXPORT_DURATION
            }),
        };
        let fps = match self.fps.as_ref() {
            None => DEFAULT_EXPORT_FPS,
            Some(raw) => number(raw).and_then(whole_fps).unwrap_or_else(|| {
                tracing::warn!(%raw, "invalid fps; using default");
                DEFAULT_EXPORT_FPS
            }),
        };
        let output = self.output.unwrap_or_else(|| DEFAULT_EXPORT_OUTPUT.to_owned());
        RecordRequest { duration, fps, output }
    }
}

/// `POST /api/record`: tell the renderer to start recording.
pub async fn start(
    State(state): State<AppState>,
    Json(body): Json<RecordBody>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let req = body.into_request();
    match store::write_record_control(&state.config, &req).await {
        Ok(_) => Ok(Json(json!({ "success": true, "message": "Recording started" }))),
        Err(e) => {
            tracing::error!(error = %e, "failed to write record control");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to start recording" })),
            ))
        }
    }
}

fn number(raw: &Value) -> Option<f64> {
    let v = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => return None,
        },
        _ => return None,
    };
    v.is_finite().then_some(v)
}

/// Truncate toward zero. Negative and out-of-range rates are rejected.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_fps(v: f64) -> Option<u32> {
    let whole = v.trunc();
    (whole >= 0.0 && whole <= f64::from(u32::MAX)).then_some(whole as u32)
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
