//! Scene model: shapes, animations, and the in-memory store that owns them.
//!
//! This module defines what is on the canvas (`Shape`, `ShapeKind`,
//! `Extent`), the time-based property modifiers bound to shapes
//! (`Animation`, `AnimProperty`), the full snapshot exchanged with the scene
//! store (`SceneSnapshot`), and the runtime store for one editing session
//! (`Scene`).
//!
//! Shapes are kept in insertion order, which is also z-order: later shapes
//! draw on top and are hit-tested first. Animations are kept in insertion
//! order for display and addressed by id through a side index.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{ANIMATION_ID_PREFIX, FALLBACK_EXTENT, FALLBACK_RADIUS};
use crate::geom::Point;

/// Unique identifier for a shape. Milliseconds-since-epoch at creation,
/// bumped forward when two shapes are created within the same millisecond.
pub type ShapeId = i64;

/// The kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Filled circle centered on the anchor.
    Circle,
    /// Axis-aligned box from the anchor corner.
    Rect,
    /// Segment from the anchor to `anchor + (dx, dy)`.
    Line,
}

/// Kind-dependent size of a shape, as it appears on the wire.
///
/// A circle carries a scalar radius; rects and lines carry a pair. Anything
/// else (including a missing `size`) is kept verbatim in `Other` and replaced
/// by a default wherever geometry is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extent {
    Radius(f64),
    Pair([f64; 2]),
    Other(serde_json::Value),
}

impl Default for Extent {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

/// A placed primitive, as stored in the scene and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Circle center, rect anchor corner, or line start point.
    #[serde(rename = "pos")]
    pub position: Point,
    #[serde(rename = "size", default)]
    pub extent: Extent,
    /// CSS color string.
    pub color: String,
}

impl Shape {
    /// Circle radius, or [`FALLBACK_RADIUS`] when the extent is not a scalar.
    #[must_use]
    pub fn radius(&self) -> f64 {
        match self.extent {
            Extent::Radius(r) => r,
            _ => FALLBACK_RADIUS,
        }
    }

    /// Rect size or line offset, or [`FALLBACK_EXTENT`] when the extent is not a pair.
    #[must_use]
    pub fn pair(&self) -> (f64, f64) {
        match self.extent {
            Extent::Pair([a, b]) => (a, b),
            _ => FALLBACK_EXTENT,
        }
    }
}

/// Property an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimProperty {
    TranslateX,
    TranslateY,
    Opacity,
}

impl AnimProperty {
    /// Wire name (`"translate_x"`, `"translate_y"`, `"opacity"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TranslateX => "translate_x",
            Self::TranslateY => "translate_y",
            Self::Opacity => "opacity",
        }
    }

}

impl FromStr for AnimProperty {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translate_x" => Ok(Self::TranslateX),
            "translate_y" => Ok(Self::TranslateY),
            "opacity" => Ok(Self::Opacity),
            _ => Err(UnknownName::new("animation property", s)),
        }
    }
}

/// A wire name that matches no variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what}: {name:?}")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
}

impl UnknownName {
    pub(crate) fn new(what: &'static str, name: &str) -> Self {
        Self { what, name: name.to_owned() }
    }
}

/// A time-based property modifier bound to one shape.
///
/// `shape_id` is a plain value: nothing checks that the shape exists, and an
/// animation pointing at a missing shape is simply inert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub id: String,
    pub shape_id: ShapeId,
    #[serde(rename = "type")]
    pub property: AnimProperty,
    pub start: f64,
    pub end: f64,
    /// Seconds from playback start.
    pub start_time: f64,
    /// Seconds the interpolation takes. Not validated.
    pub duration: f64,
    #[serde(rename = "loop")]
    pub looped: bool,
}

/// Full scene payload sent to the scene store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub animations: Vec<Animation>,
}

/// Issues strictly increasing ids from clock readings.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdAllocator {
    last: i64,
}

impl IdAllocator {
    /// Next id: `now_ms`, or one past the last id if the clock hasn't moved past it.
    pub fn next_from(&mut self, now_ms: i64) -> i64 {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    /// Make sure future ids are greater than `id`.
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn now_ms() -> i64 {
    let elapsed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
}

/// In-memory scene for one editing session.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    animations: Vec<Animation>,
    /// Animation id -> position in `animations`.
    index: HashMap<String, usize>,
    ids: IdAllocator,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes in z-order (bottom first).
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Animations in insertion order.
    #[must_use]
    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    /// Look up a shape by id.
    #[must_use]
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Look up an animation by id.
    #[must_use]
    pub fn animation(&self, id: &str) -> Option<&Animation> {
        self.index.get(id).and_then(|&i| self.animations.get(i))
    }

    /// Mutable access to an animation by id.
    pub fn animation_mut(&mut self, id: &str) -> Option<&mut Animation> {
        let i = *self.index.get(id)?;
        self.animations.get_mut(i)
    }

    /// Animations bound to `shape_id`, in insertion order.
    pub fn animations_for(&self, shape_id: ShapeId) -> impl Iterator<Item = &Animation> {
        self.animations.iter().filter(move |a| a.shape_id == shape_id)
    }

    /// Allocate a new shape id from the current clock reading.
    pub fn next_shape_id(&mut self, now_ms: i64) -> ShapeId {
        self.ids.next_from(now_ms)
    }

    /// Allocate a new animation id (`anim_<n>`).
    pub fn next_animation_id(&mut self, now_ms: i64) -> String {
        format!("{ANIMATION_ID_PREFIX}{}", self.ids.next_from(now_ms))
    }

    /// Append a shape on top of all others.
    pub fn push_shape(&mut self, shape: Shape) {
        self.ids.observe(shape.id);
        self.shapes.push(shape);
    }

    /// Append an animation. An existing animation with the same id is replaced in place.
    pub fn push_animation(&mut self, anim: Animation) {
        if let Some(existing) = self.animation_mut(&anim.id) {
            *existing = anim;
            return;
        }
        self.index.insert(anim.id.clone(), self.animations.len());
        self.animations.push(anim);
    }

    /// Remove every animation with `id`, returning the first if any was present.
    ///
    /// Duplicate ids only arrive through [`Scene::load_snapshot`]; deleting
    /// one drops them all so no stale copy becomes addressable.
    pub fn remove_animation(&mut self, id: &str) -> Option<Animation> {
        let i = self.index.remove(id)?;
        let removed = self.animations.remove(i);
        self.animations.retain(|a| a.id != id);
        self.reindex();
        Some(removed)
    }

    /// Remove every shape and animation.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.animations.clear();
        self.index.clear();
    }

    /// Copy the scene into a snapshot for the scene store.
    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot { shapes: self.shapes.clone(), animations: self.animations.clone() }
    }

    /// Replace the scene with a snapshot. Future ids are allocated past every
    /// id the snapshot contains.
    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) {
        self.shapes = snapshot.shapes;
        self.animations = snapshot.animations;
        for shape in &self.shapes {
            self.ids.observe(shape.id);
        }
        for anim in &self.animations {
            if let Some(Ok(n)) = anim.id.strip_prefix(ANIMATION_ID_PREFIX).map(str::parse::<i64>) {
                self.ids.observe(n);
            }
        }
        self.reindex();
    }

    /// Number of shapes. Animations are not counted.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the scene has no shapes and no animations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.animations.is_empty()
    }

    /// Rebuild the id index. The first occurrence of a duplicated id wins.
    fn reindex(&mut self) {
        self.index.clear();
        for (i, anim) in self.animations.iter().enumerate() {
            self.index.entry(anim.id.clone()).or_insert(i);
        }
    }
}
