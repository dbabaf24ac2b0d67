//! Animation timeline editor: create, edit, and delete animations.
//!
//! Adding is tied to the current selection; editing and deleting address an
//! animation by id whether or not its shape is selected. Every change emits
//! a `SaveScene` action. None of them request a redraw, since the editor
//! canvas doesn't preview animations.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use std::str::FromStr;

use crate::consts::{DEFAULT_ANIMATION_DURATION, DEFAULT_ANIMATION_END};
use crate::doc::{AnimProperty, Animation, Scene, UnknownName};
use crate::engine::Action;
use crate::input::EditorState;

/// An editable animation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationField {
    Property,
    Start,
    End,
    StartTime,
    Duration,
    Loop,
}

impl AnimationField {
    /// Wire name of the field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Property => "type",
            Self::Start => "start",
            Self::End => "end",
            Self::StartTime => "startTime",
            Self::Duration => "duration",
            Self::Loop => "loop",
        }
    }

}

/// Parses a wire name. `id` and `shapeId` are not editable and are rejected.
impl FromStr for AnimationField {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(Self::Property),
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "startTime" => Ok(Self::StartTime),
            "duration" => Ok(Self::Duration),
            "loop" => Ok(Self::Loop),
            _ => Err(UnknownName::new("animation field", s)),
        }
    }
}

/// Bind a new animation with default parameters to the selected shape.
///
/// Does nothing without a selection.
pub fn add_animation(scene: &mut Scene, editor: &EditorState, now_ms: i64) -> Vec<Action> {
    let Some(shape_id) = editor.selected_id else {
        return Vec::new();
    };

    let id = scene.next_animation_id(now_ms);
    scene.push_animation(Animation {
        id,
        shape_id,
        property: AnimProperty::TranslateX,
        start: 0.0,
        end: DEFAULT_ANIMATION_END,
        start_time: 0.0,
        duration: DEFAULT_ANIMATION_DURATION,
        looped: true,
    });
    vec![Action::SaveScene(scene.snapshot())]
}

/// Set one field of the animation `id` from raw form input.
///
/// Numeric fields take `0` for input that isn't a number. An unknown id or
/// an unrecognized property name changes nothing and emits nothing.
pub fn update_animation(scene: &mut Scene, id: &str, field: AnimationField, value: &str) -> Vec<Action> {
    let Some(anim) = scene.animation_mut(id) else {
        return Vec::new();
    };

    match field {
        AnimationField::Property => {
            let Ok(property) = value.trim().parse::<AnimProperty>() else {
                return Vec::new();
            };
            anim.property = property;
        }
        AnimationField::Start => anim.start = parse_number(value),
        AnimationField::End => anim.end = parse_number(value),
        AnimationField::StartTime => anim.start_time = parse_number(value),
        AnimationField::Duration => anim.duration = parse_number(value),
        AnimationField::Loop => anim.looped = parse_flag(value),
    }
    vec![Action::SaveScene(scene.snapshot())]
}

/// Remove the animation `id`. Emits nothing if there was no such animation.
pub fn delete_animation(scene: &mut Scene, id: &str) -> Vec<Action> {
    if scene.remove_animation(id).is_none() {
        return Vec::new();
    }
    vec![Action::SaveScene(scene.snapshot())]
}

/// Animations bound to the selected shape, for display. Empty without a selection.
#[must_use]
pub fn selected_animations<'a>(scene: &'a Scene, editor: &EditorState) -> Vec<&'a Animation> {
    match editor.selected_id {
        Some(id) => scene.animations_for(id).collect(),
        None => Vec::new(),
    }
}

/// Parse numeric form input. Input that doesn't parse, or parses to NaN, becomes `0`.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on" | "yes")
}
