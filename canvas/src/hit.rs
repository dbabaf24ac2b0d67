#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Shape, ShapeId, ShapeKind};
use crate::geom::Point;

/// Whether `pt` lies on `shape`.
///
/// Circles include their boundary. Rect bounds are normalized, so a rect
/// dragged up or left is hit the same as one dragged down and right. Lines
/// are never hit.
#[must_use]
pub fn contains(shape: &Shape, pt: Point) -> bool {
    match shape.kind {
        ShapeKind::Circle => {
            let r = shape.radius();
            let (dx, dy) = shape.position.delta_to(pt);
            dx * dx + dy * dy <= r * r
        }
        ShapeKind::Rect => {
            let (w, h) = shape.pair();
            let (x0, x1) = span(shape.position.x, w);
            let (y0, y1) = span(shape.position.y, h);
            (x0..=x1).contains(&pt.x) && (y0..=y1).contains(&pt.y)
        }
        ShapeKind::Line => false,
    }
}

/// The topmost shape under `pt`: scans from the last-inserted shape down.
#[must_use]
pub fn topmost_hit(shapes: &[Shape], pt: Point) -> Option<ShapeId> {
    shapes.iter().rev().find(|s| contains(s, pt)).map(|s| s.id)
}

fn span(origin: f64, len: f64) -> (f64, f64) {
    let end = origin + len;
    (origin.min(end), origin.max(end))
}
