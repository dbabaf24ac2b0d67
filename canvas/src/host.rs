//! JavaScript-backed collaborators for the browser host.
//!
//! The page hands the engine two plain JS functions, one posting to the
//! scene store and one posting to render control. Each is called with a
//! JSON string body. The render-control function may return the reply body
//! as a string; any other return value (`undefined`, a pending promise)
//! counts as an empty acknowledgement. A function that throws surfaces as
//! [`BridgeError::Unavailable`].

use js_sys::Function;
use wasm_bindgen::JsValue;

use crate::bridge::{self, BridgeError, RecordAck, RecordRequest, RenderControl, SceneStore};
use crate::doc::SceneSnapshot;

/// Scene store backed by a JS `(body: string) => void`.
pub struct JsSceneStore {
    post: Function,
}

impl JsSceneStore {
    #[must_use]
    pub fn new(post: Function) -> Self {
        Self { post }
    }
}

impl SceneStore for JsSceneStore {
    fn save(&mut self, snapshot: &SceneSnapshot) -> Result<(), BridgeError> {
        let body = bridge::encode_snapshot(snapshot)?;
        self.post.call1(&JsValue::NULL, &JsValue::from_str(&body)).map_err(thrown)?;
        Ok(())
    }
}

/// Render control backed by a JS `(body: string) => string | undefined`.
pub struct JsRenderControl {
    post: Function,
}

impl JsRenderControl {
    #[must_use]
    pub fn new(post: Function) -> Self {
        Self { post }
    }
}

impl RenderControl for JsRenderControl {
    fn start_recording(&mut self, request: &RecordRequest) -> Result<RecordAck, BridgeError> {
        let body = bridge::encode_record_request(request)?;
        let reply = self.post.call1(&JsValue::NULL, &JsValue::from_str(&body)).map_err(thrown)?;
        bridge::decode_ack(reply.as_string().as_deref().unwrap_or_default())
    }
}

fn thrown(err: JsValue) -> BridgeError {
    BridgeError::Unavailable(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
