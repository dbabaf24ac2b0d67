//! Shared constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default drawing surface width in CSS pixels.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Default drawing surface height in CSS pixels.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Spacing between grid lines, in canvas units.
pub const GRID_STEP: f64 = 50.0;

/// Background fill.
pub const BACKGROUND_COLOR: &str = "#1e1e1e";

/// Grid line color.
pub const GRID_COLOR: &str = "#333";

/// Grid line width.
pub const GRID_LINE_WIDTH: f64 = 1.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Stroke width for unselected shapes.
pub const SHAPE_LINE_WIDTH: f64 = 2.0;

/// Stroke and glow color for the selected shape.
pub const SELECTION_COLOR: &str = "#00ffff";

/// Stroke width for the selected shape.
pub const SELECTION_LINE_WIDTH: f64 = 4.0;

/// Glow blur radius for the selected shape.
pub const SELECTION_GLOW_BLUR: f64 = 10.0;

/// Radius substituted when a circle's extent is not a scalar.
pub const FALLBACK_RADIUS: f64 = 10.0;

/// Width/height substituted when a rect or line extent is not a pair.
pub const FALLBACK_EXTENT: (f64, f64) = (20.0, 20.0);

/// Color of the drawing tool when a session starts.
pub const DEFAULT_COLOR: &str = "#ff0000";

// ── Animations ──────────────────────────────────────────────────

/// Prefix for generated animation ids.
pub const ANIMATION_ID_PREFIX: &str = "anim_";

/// `end` value for a newly added animation.
pub const DEFAULT_ANIMATION_END: f64 = 100.0;

/// `duration` in seconds for a newly added animation.
pub const DEFAULT_ANIMATION_DURATION: f64 = 2.0;

// ── Export ──────────────────────────────────────────────────────

/// Default recording length in seconds.
pub const DEFAULT_EXPORT_DURATION: f64 = 10.0;

/// Default recording frame rate.
pub const DEFAULT_EXPORT_FPS: u32 = 60;

/// Default output file name.
pub const DEFAULT_EXPORT_OUTPUT: &str = "animation.mp4";
