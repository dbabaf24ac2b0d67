#![allow(clippy::float_cmp)]

use super::*;

fn saved(actions: &[Action]) -> usize {
    actions.iter().filter(|a| matches!(a, Action::SaveScene(_))).count()
}

fn drag(editor: &mut EditorState, scene: &mut Scene, from: Point, to: Point, now: i64) -> Vec<Action> {
    pointer_down(editor, scene, from);
    pointer_up(editor, scene, to, now)
}

// =============================================================
// Tool / defaults
// =============================================================

#[test]
fn tool_default_is_circle() {
    assert_eq!(Tool::default(), Tool::Circle);
}

#[test]
fn tool_maps_to_kind() {
    assert_eq!(Tool::Circle.kind(), ShapeKind::Circle);
    assert_eq!(Tool::Rect.kind(), ShapeKind::Rect);
    assert_eq!(Tool::Line.kind(), ShapeKind::Line);
}

#[test]
fn editor_defaults() {
    let editor = EditorState::new();
    assert_eq!(editor.color, "#ff0000");
    assert_eq!(editor.selected_id, None);
    assert_eq!(editor.input, InputState::Idle);
    assert!(!editor.export.open);
    assert_eq!(editor.export.duration, 10.0);
    assert_eq!(editor.export.fps, 60);
    assert_eq!(editor.export.output, "animation.mp4");
}

#[test]
fn export_settings_build_request() {
    let settings = ExportSettings { open: true, duration: 3.5, fps: 24, output: "clip.mp4".into() };
    let req = settings.request();
    assert_eq!(req.duration, 3.5);
    assert_eq!(req.fps, 24);
    assert_eq!(req.output, "clip.mp4");
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn pointer_down_on_empty_canvas_starts_drawing() {
    let mut editor = EditorState::new();
    let scene = Scene::new();
    let actions = pointer_down(&mut editor, &scene, Point::new(5.0, 6.0));
    assert_eq!(editor.input, InputState::Drawing { anchor: Point::new(5.0, 6.0) });
    assert!(actions.is_empty());
}

#[test]
fn circle_drag_uses_euclidean_radius() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    let actions = drag(&mut editor, &mut scene, Point::new(10.0, 10.0), Point::new(13.0, 14.0), 1);

    let shape = &scene.shapes()[0];
    assert_eq!(shape.kind, ShapeKind::Circle);
    assert_eq!(shape.position, Point::new(10.0, 10.0));
    assert_eq!(shape.extent, Extent::Radius(5.0));
    assert_eq!(shape.color, "#ff0000");
    assert_eq!(editor.input, InputState::Idle);
    assert_eq!(saved(&actions), 1);
    assert!(actions.iter().any(|a| matches!(a, Action::RenderNeeded)));
}

#[test]
fn rect_drag_keeps_signed_extent() {
    let mut editor = EditorState { tool: Tool::Rect, ..EditorState::new() };
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(100.0, 100.0), Point::new(60.0, 130.0), 1);
    assert_eq!(scene.shapes()[0].extent, Extent::Pair([-40.0, 30.0]));
}

#[test]
fn line_drag_stores_offset() {
    let mut editor = EditorState { tool: Tool::Line, color: "#00ff00".into(), ..EditorState::new() };
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(0.0, 0.0), Point::new(30.0, -10.0), 1);
    let shape = &scene.shapes()[0];
    assert_eq!(shape.kind, ShapeKind::Line);
    assert_eq!(shape.extent, Extent::Pair([30.0, -10.0]));
    assert_eq!(shape.color, "#00ff00");
}

#[test]
fn zero_length_drag_creates_zero_size_shapes() {
    for (tool, expected) in [
        (Tool::Circle, Extent::Radius(0.0)),
        (Tool::Rect, Extent::Pair([0.0, 0.0])),
        (Tool::Line, Extent::Pair([0.0, 0.0])),
    ] {
        let mut editor = EditorState { tool, ..EditorState::new() };
        let mut scene = Scene::new();
        let actions = drag(&mut editor, &mut scene, Point::new(10.0, 10.0), Point::new(10.0, 10.0), 1);
        assert_eq!(scene.shape_count(), 1);
        assert_eq!(scene.shapes()[0].extent, expected);
        assert_eq!(saved(&actions), 1);
    }
}

#[test]
fn new_shapes_go_on_top_with_increasing_ids() {
    let mut editor = EditorState { tool: Tool::Rect, ..EditorState::new() };
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(0.0, 0.0), Point::new(10.0, 10.0), 1000);
    // Second draw starts in the empty area to the right.
    drag(&mut editor, &mut scene, Point::new(200.0, 0.0), Point::new(210.0, 10.0), 1000);
    let ids: Vec<_> = scene.shapes().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1000, 1001]);
}

#[test]
fn snapshot_in_save_action_includes_new_shape() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    let actions = drag(&mut editor, &mut scene, Point::new(0.0, 0.0), Point::new(1.0, 0.0), 1);
    let Some(Action::SaveScene(snapshot)) = actions.first() else {
        panic!("expected SaveScene first, got {actions:?}");
    };
    assert_eq!(snapshot.shapes.len(), 1);
}

#[test]
fn pointer_up_while_idle_is_noop() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    let actions = pointer_up(&mut editor, &mut scene, Point::new(1.0, 1.0), 1);
    assert!(actions.is_empty());
    assert!(scene.is_empty());
}

#[test]
fn tool_and_color_are_read_at_release() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    pointer_down(&mut editor, &scene, Point::new(0.0, 0.0));
    editor.tool = Tool::Line;
    editor.color = "#123456".into();
    pointer_up(&mut editor, &mut scene, Point::new(5.0, 5.0), 1);
    assert_eq!(scene.shapes()[0].kind, ShapeKind::Line);
    assert_eq!(scene.shapes()[0].color, "#123456");
}

// =============================================================
// Selection
// =============================================================

#[test]
fn pointer_down_on_shape_selects_without_drawing() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(50.0, 50.0), Point::new(70.0, 50.0), 1);
    let id = scene.shapes()[0].id;

    let actions = pointer_down(&mut editor, &scene, Point::new(55.0, 55.0));
    assert_eq!(editor.selected_id, Some(id));
    assert_eq!(editor.input, InputState::Idle);
    assert!(matches!(actions.as_slice(), [Action::RenderNeeded]));

    let actions = pointer_up(&mut editor, &mut scene, Point::new(90.0, 90.0), 2);
    assert!(actions.is_empty());
    assert_eq!(scene.shape_count(), 1);
}

#[test]
fn overlapping_shapes_select_the_later_one() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(100.0, 100.0), Point::new(140.0, 100.0), 1);
    let a = scene.shapes()[0].id;

    // Start B just outside A so the press draws instead of selecting.
    editor.tool = Tool::Rect;
    drag(&mut editor, &mut scene, Point::new(60.0, 60.0), Point::new(120.0, 120.0), 2);
    let b = scene.shapes()[1].id;
    assert_ne!(a, b);

    pointer_down(&mut editor, &scene, Point::new(100.0, 100.0));
    assert_eq!(editor.selected_id, Some(b));
}

#[test]
fn miss_clears_selection() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(50.0, 50.0), Point::new(60.0, 50.0), 1);
    pointer_down(&mut editor, &scene, Point::new(50.0, 50.0));
    assert!(editor.selected_id.is_some());

    let actions = pointer_down(&mut editor, &scene, Point::new(400.0, 400.0));
    assert_eq!(editor.selected_id, None);
    assert!(editor.is_drawing());
    assert!(matches!(actions.as_slice(), [Action::RenderNeeded]));
}

#[test]
fn reselecting_same_shape_needs_no_redraw() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(50.0, 50.0), Point::new(60.0, 50.0), 1);
    pointer_down(&mut editor, &scene, Point::new(50.0, 50.0));
    let actions = pointer_down(&mut editor, &scene, Point::new(51.0, 50.0));
    assert!(actions.is_empty());
}

#[test]
fn lines_cannot_be_selected() {
    let mut editor = EditorState { tool: Tool::Line, ..EditorState::new() };
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(0.0, 0.0), Point::new(100.0, 0.0), 1);
    pointer_down(&mut editor, &scene, Point::new(0.0, 0.0));
    assert_eq!(editor.selected_id, None);
    assert!(editor.is_drawing());
}

// =============================================================
// Clear
// =============================================================

#[test]
fn clear_scene_empties_and_persists() {
    let mut editor = EditorState::new();
    let mut scene = Scene::new();
    drag(&mut editor, &mut scene, Point::new(50.0, 50.0), Point::new(60.0, 50.0), 1);
    pointer_down(&mut editor, &scene, Point::new(50.0, 50.0));

    let actions = clear_scene(&mut editor, &mut scene);
    assert!(scene.is_empty());
    assert_eq!(editor.selected_id, None);
    let Some(Action::SaveScene(snapshot)) = actions.first() else {
        panic!("expected SaveScene first, got {actions:?}");
    };
    assert!(snapshot.shapes.is_empty());
    assert!(snapshot.animations.is_empty());
}

#[test]
fn build_shape_is_pure() {
    let a = build_shape(1, Tool::Rect, "#fff", Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    let b = build_shape(1, Tool::Rect, "#fff", Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    assert_eq!(a, b);
}
