use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::bridge::{ExportOutcome, ExportTrigger, PersistenceBridge, RenderControl, SceneStore};
use crate::doc::{self, Animation, Scene, SceneSnapshot, Shape, ShapeId};
use crate::geom::Point;
use crate::input::{self, Button, EditorState, InputState, Tool};
use crate::render::{self, DrawCmd, Viewport};
use crate::timeline::{self, AnimationField};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The scene changed; persist this full snapshot.
    SaveScene(SceneSnapshot),
    /// Shapes or selection changed; repaint the canvas.
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub editor: EditorState,
    pub viewport: Viewport,
    /// Milliseconds-since-epoch source for new ids.
    pub clock: fn() -> i64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self { scene: Scene::new(), editor: EditorState::new(), viewport: Viewport::default(), clock: doc::now_ms }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the scene from a stored snapshot. Drops the selection and any
    /// gesture in progress.
    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) -> Vec<Action> {
        self.scene.load_snapshot(snapshot);
        self.editor.selected_id = None;
        self.editor.input = InputState::Idle;
        vec![Action::RenderNeeded]
    }

    // --- Tool / color ---

    /// Set the shape kind the next draw creates.
    pub fn set_tool(&mut self, tool: Tool) {
        self.editor.tool = tool;
    }

    /// Set the color applied to newly drawn shapes.
    pub fn set_color(&mut self, color: &str) {
        color.clone_into(&mut self.editor.color);
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        input::pointer_down(&mut self.editor, &self.scene, pt)
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        input::pointer_up(&mut self.editor, &mut self.scene, pt, (self.clock)())
    }

    /// Remove all shapes and animations.
    pub fn clear_scene(&mut self) -> Vec<Action> {
        input::clear_scene(&mut self.editor, &mut self.scene)
    }

    // --- Timeline ---

    /// Add a default animation to the selected shape. No-op without a selection.
    pub fn add_animation(&mut self) -> Vec<Action> {
        timeline::add_animation(&mut self.scene, &self.editor, (self.clock)())
    }

    /// Set one field of an animation from raw form input.
    pub fn update_animation(&mut self, id: &str, field: AnimationField, value: &str) -> Vec<Action> {
        timeline::update_animation(&mut self.scene, id, field, value)
    }

    pub fn delete_animation(&mut self, id: &str) -> Vec<Action> {
        timeline::delete_animation(&mut self.scene, id)
    }

    // --- Export ---

    pub fn open_export(&mut self) {
        self.editor.export.open = true;
    }

    pub fn close_export(&mut self) {
        self.editor.export.open = false;
    }

    pub fn set_export_duration(&mut self, seconds: f64) {
        self.editor.export.duration = seconds;
    }

    pub fn set_export_fps(&mut self, fps: u32) {
        self.editor.export.fps = fps;
    }

    pub fn set_export_output(&mut self, output: &str) {
        output.clone_into(&mut self.editor.export.output);
    }

    /// Send the export settings to render control. Closes the export dialog
    /// once the request is delivered.
    pub fn start_export<R: RenderControl>(&mut self, trigger: &mut ExportTrigger<R>) -> ExportOutcome {
        let outcome = trigger.start(&self.editor.export.request());
        if outcome.is_started() {
            self.close_export();
        }
        outcome
    }

    // --- Queries ---

    /// The currently selected shape id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.editor.selected_id
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.scene.shape(id)
    }

    /// Animations of the selected shape, for the properties panel.
    #[must_use]
    pub fn selected_animations(&self) -> Vec<&Animation> {
        timeline::selected_animations(&self.scene, &self.editor)
    }

    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.snapshot()
    }

    /// Drawing for the current shapes and selection.
    #[must_use]
    pub fn draw_commands(&self) -> Vec<DrawCmd> {
        render::draw_commands(self.scene.shapes(), self.editor.selected_id, self.viewport)
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, sized to it.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let mut core = EngineCore::new();
        core.viewport = Viewport { width: f64::from(canvas.width()), height: f64::from(canvas.height()) };
        Self { canvas, core }
    }

    // --- Delegated inputs ---

    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) -> Vec<Action> {
        self.core.load_snapshot(snapshot)
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.core.set_tool(tool);
    }

    pub fn set_color(&mut self, color: &str) {
        self.core.set_color(color);
    }

    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(pt, button)
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(pt, button)
    }

    pub fn clear_scene(&mut self) -> Vec<Action> {
        self.core.clear_scene()
    }

    pub fn add_animation(&mut self) -> Vec<Action> {
        self.core.add_animation()
    }

    pub fn update_animation(&mut self, id: &str, field: AnimationField, value: &str) -> Vec<Action> {
        self.core.update_animation(id, field, value)
    }

    pub fn delete_animation(&mut self, id: &str) -> Vec<Action> {
        self.core.delete_animation(id)
    }

    pub fn start_export<R: RenderControl>(&mut self, trigger: &mut ExportTrigger<R>) -> ExportOutcome {
        self.core.start_export(trigger)
    }

    // --- Action processing ---

    /// Persist every snapshot in `actions` and repaint if any action asks for it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context or a draw call fails.
    /// Save failures are logged by the bridge and never surface here.
    pub fn process<S: SceneStore>(&self, actions: &[Action], bridge: &mut PersistenceBridge<S>) -> Result<(), JsValue> {
        bridge.dispatch(actions);
        if actions.contains(&Action::RenderNeeded) {
            self.render()?;
        }
        Ok(())
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context or a draw call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::paint(&ctx, &self.core.draw_commands())
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ShapeId> {
        self.core.selection()
    }

    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.core.shape(id)
    }
}
