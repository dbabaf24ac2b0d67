//! Editor state and the pointer state machine.
//!
//! `EditorState` is the whole of the session's UI state: active tool and
//! color, the selection, the gesture in progress, and the export dialog.
//! It is passed explicitly to the controller functions here and to the
//! timeline editor rather than living in globals.
//!
//! A pointer-down either selects the topmost shape under the pointer or,
//! when nothing is hit, clears the selection and starts a draw anchored at
//! the pointer. The matching pointer-up finishes the draw by appending a new
//! shape sized from the drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::bridge::RecordRequest;
use crate::consts::{DEFAULT_COLOR, DEFAULT_EXPORT_DURATION, DEFAULT_EXPORT_FPS, DEFAULT_EXPORT_OUTPUT};
use crate::doc::{Extent, Scene, Shape, ShapeId, ShapeKind};
use crate::engine::Action;
use crate::geom::Point;
use crate::hit;

/// Which shape the next draw creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Circle,
    Rect,
    Line,
}

impl Tool {
    /// The shape kind this tool draws.
    #[must_use]
    pub fn kind(self) -> ShapeKind {
        match self {
            Self::Circle => ShapeKind::Circle,
            Self::Rect => ShapeKind::Rect,
            Self::Line => ShapeKind::Line,
        }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button.
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A new shape is being dragged out from `anchor`.
    Drawing { anchor: Point },
}

/// Recording parameters edited in the export dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Whether the export dialog is showing.
    pub open: bool,
    /// Recording length in seconds.
    pub duration: f64,
    pub fps: u32,
    /// Output file name.
    pub output: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            open: false,
            duration: DEFAULT_EXPORT_DURATION,
            fps: DEFAULT_EXPORT_FPS,
            output: DEFAULT_EXPORT_OUTPUT.to_owned(),
        }
    }
}

impl ExportSettings {
    /// The recording request these settings describe.
    #[must_use]
    pub fn request(&self) -> RecordRequest {
        RecordRequest { duration: self.duration, fps: self.fps, output: self.output.clone() }
    }
}

/// UI state for one editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub tool: Tool,
    /// CSS color applied to newly drawn shapes.
    pub color: String,
    pub selected_id: Option<ShapeId>,
    pub input: InputState,
    pub export: ExportSettings,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            color: DEFAULT_COLOR.to_owned(),
            selected_id: None,
            input: InputState::Idle,
            export: ExportSettings::default(),
        }
    }
}

impl EditorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a draw gesture is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self.input, InputState::Drawing { .. })
    }
}

/// Handle a primary pointer-down at `pt`.
///
/// Emits `RenderNeeded` when the selection changed.
pub fn pointer_down(editor: &mut EditorState, scene: &Scene, pt: Point) -> Vec<Action> {
    let previous = editor.selected_id;

    match hit::topmost_hit(scene.shapes(), pt) {
        Some(id) => {
            editor.selected_id = Some(id);
            editor.input = InputState::Idle;
        }
        None => {
            editor.selected_id = None;
            editor.input = InputState::Drawing { anchor: pt };
        }
    }

    if editor.selected_id == previous {
        Vec::new()
    } else {
        vec![Action::RenderNeeded]
    }
}

/// Handle a primary pointer-up at `pt`.
///
/// Finishes a draw in progress by appending a shape of the active tool and
/// color. Zero-length drags produce zero-size shapes. Does nothing when idle.
pub fn pointer_up(editor: &mut EditorState, scene: &mut Scene, pt: Point, now_ms: i64) -> Vec<Action> {
    let InputState::Drawing { anchor } = editor.input else {
        return Vec::new();
    };
    editor.input = InputState::Idle;

    let id = scene.next_shape_id(now_ms);
    scene.push_shape(build_shape(id, editor.tool, &editor.color, anchor, pt));

    vec![Action::SaveScene(scene.snapshot()), Action::RenderNeeded]
}

/// Remove every shape and animation and drop the selection.
pub fn clear_scene(editor: &mut EditorState, scene: &mut Scene) -> Vec<Action> {
    scene.clear();
    editor.selected_id = None;
    editor.input = InputState::Idle;
    vec![Action::SaveScene(scene.snapshot()), Action::RenderNeeded]
}

/// Build the shape a drag from `anchor` to `release` describes.
#[must_use]
pub fn build_shape(id: ShapeId, tool: Tool, color: &str, anchor: Point, release: Point) -> Shape {
    let extent = match tool {
        Tool::Circle => Extent::Radius(anchor.distance_to(release)),
        Tool::Rect | Tool::Line => {
            let (dx, dy) = anchor.delta_to(release);
            Extent::Pair([dx, dy])
        }
    };
    Shape { id, kind: tool.kind(), position: anchor, extent, color: color.to_owned() }
}
