//! File-backed scene store and render control.
//!
//! DESIGN
//! ======
//! Both endpoints end in a JSON file in the data directory: the scene
//! snapshot for the editor to reload, and the control file the external
//! renderer polls. Writes go to a uniquely named temp file in the same
//! directory and are renamed over the target, so a reader sees either the
//! previous document or the new one. Concurrent writers race and the last
//! rename wins.

use std::path::{Path, PathBuf};

use canvas::bridge::RecordRequest;
use canvas::doc::SceneSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::StudioConfig;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),
}

/// Contents of the render control file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordControl {
    pub recording: bool,
    pub duration: f64,
    pub fps: u32,
    pub output: String,
}

impl From<&RecordRequest> for RecordControl {
    fn from(req: &RecordRequest) -> Self {
        Self { recording: true, duration: req.duration, fps: req.fps, output: req.output.clone() }
    }
}

/// Persist the full scene snapshot, replacing any previous one.
///
/// # Errors
///
/// Returns `Err` if the snapshot can't be encoded or the file can't be written.
pub async fn save_scene(config: &StudioConfig, snapshot: &SceneSnapshot) -> Result<PathBuf, StoreError> {
    let path = config.scene_path();
    write_json(&path, snapshot).await?;
    info!(
        path = %path.display(),
        shapes = snapshot.shapes.len(),
        animations = snapshot.animations.len(),
        "scene saved"
    );
    Ok(path)
}

/// Signal the renderer to start recording.
///
/// # Errors
///
/// Returns `Err` if the control file can't be written.
pub async fn write_record_control(config: &StudioConfig, req: &RecordRequest) -> Result<RecordControl, StoreError> {
    let control = RecordControl::from(req);
    let path = config.record_path();
    write_json(&path, &control).await?;
    info!(path = %path.display(), duration = control.duration, fps = control.fps, output = %control.output, "recording requested");
    Ok(control)
}

/// Write `value` as pretty-printed JSON to `path` via temp file and rename.
///
/// # Errors
///
/// Returns `Err` on encode failure, on a path without a file name, or on
/// any filesystem error. The temp file is removed whenever the write or the
/// rename fails.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let body = serde_json::to_vec_pretty(value)?;
    let tmp = temp_path(path)?;

    let written = match tokio::fs::write(&tmp, &body).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        discard_temp(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

/// Remove a leftover temp file. A file that was never created is fine.
async fn discard_temp(tmp: &Path) {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %tmp.display(), error = %e, "failed to remove temp file"),
    }
}

fn temp_path(path: &Path) -> Result<PathBuf, StoreError> {
    let Some(name) = path.file_name() else {
        return Err(StoreError::InvalidPath(path.to_path_buf()));
    };
    let tmp_name = format!(".{}.{}.tmp", name.to_string_lossy(), Uuid::new_v4().simple());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
