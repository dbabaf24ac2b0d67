//! Render pass: turns shapes and the selection into canvas drawing.
//!
//! [`draw_commands`] is a pure function producing a flat list of
//! [`DrawCmd`]s; the same shapes and selection always produce the same list.
//! [`paint`] replays a list onto a [`web_sys::CanvasRenderingContext2d`] and
//! is the only place in the crate that touches the browser canvas.
//!
//! Drawing order is fixed: background, grid, then shapes bottom to top.
//! Animations are not previewed.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    BACKGROUND_COLOR, CANVAS_HEIGHT, CANVAS_WIDTH, GRID_COLOR, GRID_LINE_WIDTH, GRID_STEP, SELECTION_COLOR,
    SELECTION_GLOW_BLUR, SELECTION_LINE_WIDTH, SHAPE_LINE_WIDTH,
};
use crate::doc::{Shape, ShapeId, ShapeKind};
use crate::geom::Point;

/// Size of the drawing surface in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: CANVAS_WIDTH, height: CANVAS_HEIGHT }
    }
}

/// One 2D-context operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    Shadow { color: String, blur: f64 },
    FillRect { x: f64, y: f64, w: f64, h: f64 },
    StrokeRect { x: f64, y: f64, w: f64, h: f64 },
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    /// Full circle.
    Arc { center: Point, radius: f64 },
    Fill,
    Stroke,
}

/// Build the drawing for `shapes` with `selected` highlighted.
#[must_use]
pub fn draw_commands(shapes: &[Shape], selected: Option<ShapeId>, viewport: Viewport) -> Vec<DrawCmd> {
    let mut out = Vec::new();

    // Layer 1: background.
    out.push(DrawCmd::FillStyle(BACKGROUND_COLOR.to_owned()));
    out.push(DrawCmd::FillRect { x: 0.0, y: 0.0, w: viewport.width, h: viewport.height });

    // Layer 2: grid.
    draw_grid(&mut out, viewport);

    // Layer 3: shapes, bottom first.
    for shape in shapes {
        draw_shape(&mut out, shape, selected == Some(shape.id));
    }

    out
}

fn draw_grid(out: &mut Vec<DrawCmd>, viewport: Viewport) {
    out.push(DrawCmd::StrokeStyle(GRID_COLOR.to_owned()));
    out.push(DrawCmd::LineWidth(GRID_LINE_WIDTH));

    for x in grid_stops(viewport.width) {
        segment(out, Point::new(x, 0.0), Point::new(x, viewport.height));
    }
    for y in grid_stops(viewport.height) {
        segment(out, Point::new(0.0, y), Point::new(viewport.width, y));
    }
}

/// `0, GRID_STEP, 2 * GRID_STEP, ...` strictly below `limit`.
fn grid_stops(limit: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(|i| f64::from(i) * GRID_STEP)
        .take_while(move |v| *v < limit)
}

fn segment(out: &mut Vec<DrawCmd>, from: Point, to: Point) {
    out.push(DrawCmd::BeginPath);
    out.push(DrawCmd::MoveTo(from));
    out.push(DrawCmd::LineTo(to));
    out.push(DrawCmd::Stroke);
}

fn draw_shape(out: &mut Vec<DrawCmd>, shape: &Shape, selected: bool) {
    out.push(DrawCmd::Save);

    if selected {
        out.push(DrawCmd::StrokeStyle(SELECTION_COLOR.to_owned()));
        out.push(DrawCmd::LineWidth(SELECTION_LINE_WIDTH));
        out.push(DrawCmd::Shadow { color: SELECTION_COLOR.to_owned(), blur: SELECTION_GLOW_BLUR });
    } else {
        out.push(DrawCmd::StrokeStyle(shape.color.clone()));
        out.push(DrawCmd::LineWidth(SHAPE_LINE_WIDTH));
    }
    out.push(DrawCmd::FillStyle(shape.color.clone()));

    let p = shape.position;
    match shape.kind {
        ShapeKind::Circle => {
            // Canvas arcs reject negative radii.
            let radius = shape.radius().max(0.0);
            out.push(DrawCmd::BeginPath);
            out.push(DrawCmd::Arc { center: p, radius });
            out.push(DrawCmd::Fill);
            out.push(DrawCmd::Stroke);
        }
        ShapeKind::Rect => {
            let (w, h) = shape.pair();
            out.push(DrawCmd::FillRect { x: p.x, y: p.y, w, h });
            out.push(DrawCmd::StrokeRect { x: p.x, y: p.y, w, h });
        }
        ShapeKind::Line => {
            let (dx, dy) = shape.pair();
            segment(out, p, Point::new(p.x + dx, p.y + dy));
        }
    }

    out.push(DrawCmd::Restore);
}

/// Replay `cmds` onto a 2D context.
///
/// # Errors
///
/// Returns `Err` if a `Canvas2D` call fails.
pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) -> Result<(), JsValue> {
    for cmd in cmds {
        match cmd {
            DrawCmd::Save => ctx.save(),
            DrawCmd::Restore => ctx.restore(),
            DrawCmd::FillStyle(color) => ctx.set_fill_style_str(color),
            DrawCmd::StrokeStyle(color) => ctx.set_stroke_style_str(color),
            DrawCmd::LineWidth(w) => ctx.set_line_width(*w),
            DrawCmd::Shadow { color, blur } => {
                ctx.set_shadow_color(color);
                ctx.set_shadow_blur(*blur);
            }
            DrawCmd::FillRect { x, y, w, h } => ctx.fill_rect(*x, *y, *w, *h),
            DrawCmd::StrokeRect { x, y, w, h } => ctx.stroke_rect(*x, *y, *w, *h),
            DrawCmd::BeginPath => ctx.begin_path(),
            DrawCmd::MoveTo(p) => ctx.move_to(p.x, p.y),
            DrawCmd::LineTo(p) => ctx.line_to(p.x, p.y),
            DrawCmd::Arc { center, radius } => ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI)?,
            DrawCmd::Fill => ctx.fill(),
            DrawCmd::Stroke => ctx.stroke(),
        }
    }
    Ok(())
}
