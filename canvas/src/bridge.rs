//! Collaborator seams: the scene store and render control.
//!
//! The engine never talks to storage or the video renderer directly. Scene
//! mutations come back from the engine as [`Action::SaveScene`], and the host
//! feeds them to a [`PersistenceBridge`], which forwards each snapshot to a
//! [`SceneStore`]. Saves are optimistic: a failed save is logged and the
//! in-memory scene is kept as is, with no retry.
//!
//! Exports go through an [`ExportTrigger`], which forwards a
//! [`RecordRequest`] to a [`RenderControl`] and reports "started" as soon as
//! the request is accepted. Completion of the recording is never tracked.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use serde::{Deserialize, Serialize};

use crate::doc::SceneSnapshot;
use crate::engine::Action;

// =============================================================
// Types
// =============================================================

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recording request sent to render control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRequest {
    /// Seconds of playback to record.
    pub duration: f64,
    pub fps: u32,
    /// Output file name.
    pub output: String,
}

/// Acknowledgement returned by render control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// Durable sink for full scene snapshots. Last write wins.
pub trait SceneStore {
    /// Persist `snapshot`, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the snapshot could not be handed off.
    fn save(&mut self, snapshot: &SceneSnapshot) -> Result<(), BridgeError>;
}

/// Signals the out-of-process renderer to start recording.
pub trait RenderControl {
    /// Ask the renderer to record. The acknowledgement says the request was
    /// received, not that a video was produced.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the request could not be delivered.
    fn start_recording(&mut self, request: &RecordRequest) -> Result<RecordAck, BridgeError>;
}

impl<F> SceneStore for F
where
    F: FnMut(&SceneSnapshot) -> Result<(), BridgeError>,
{
    fn save(&mut self, snapshot: &SceneSnapshot) -> Result<(), BridgeError> {
        self(snapshot)
    }
}

/// Serialize a snapshot as the JSON body the scene store expects.
///
/// # Errors
///
/// Returns [`BridgeError::Json`] if serialization fails.
pub fn encode_snapshot(snapshot: &SceneSnapshot) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Serialize a recording request as the JSON body render control expects.
///
/// # Errors
///
/// Returns [`BridgeError::Json`] if serialization fails.
pub fn encode_record_request(request: &RecordRequest) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(request)?)
}

/// Parse a render-control reply. A blank reply is an empty acknowledgement.
///
/// # Errors
///
/// Returns [`BridgeError::Json`] if a non-blank reply isn't an acknowledgement.
pub fn decode_ack(body: &str) -> Result<RecordAck, BridgeError> {
    if body.trim().is_empty() {
        return Ok(RecordAck::default());
    }
    Ok(serde_json::from_str(body)?)
}

// =============================================================
// Persistence
// =============================================================

/// Forwards `SaveScene` actions to a scene store.
pub struct PersistenceBridge<S> {
    store: S,
    failures: usize,
}

impl<S: SceneStore> PersistenceBridge<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store, failures: 0 }
    }

    /// Forward every snapshot in `actions`, in order. Other actions are
    /// ignored. Returns how many snapshots were forwarded.
    pub fn dispatch(&mut self, actions: &[Action]) -> usize {
        let mut forwarded = 0;
        for action in actions {
            let Action::SaveScene(snapshot) = action else {
                continue;
            };
            forwarded += 1;
            if let Err(e) = self.store.save(snapshot) {
                self.failures += 1;
                log::warn!("scene save failed: {e}");
            }
        }
        forwarded
    }

    /// Number of saves that have failed so far.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================
// Export
// =============================================================

/// What the host should tell the user after an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The request reached render control.
    Started { message: String },
    /// The request could not be delivered; the host shows an alert.
    Failed { message: String },
}

impl ExportOutcome {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Started { message } | Self::Failed { message } => message,
        }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started { .. })
    }
}

/// Forwards recording requests to render control.
pub struct ExportTrigger<R> {
    control: R,
}

impl<R: RenderControl> ExportTrigger<R> {
    #[must_use]
    pub fn new(control: R) -> Self {
        Self { control }
    }

    /// Send `request` unmodified. Reports started as soon as the request is
    /// delivered, whatever the acknowledgement says about the recording.
    pub fn start(&mut self, request: &RecordRequest) -> ExportOutcome {
        match self.control.start_recording(request) {
            Ok(ack) => {
                log::info!("recording requested: output={} ack={:?}", request.output, ack.message);
                ExportOutcome::Started {
                    message: format!("Recording started! Video will be saved as {}", request.output),
                }
            }
            Err(e) => {
                log::error!("export failed: {e}");
                ExportOutcome::Failed { message: "Failed to start export".to_owned() }
            }
        }
    }

    #[must_use]
    pub fn control(&self) -> &R {
        &self.control
    }
}
