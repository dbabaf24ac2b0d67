//! Editing engine for the animation studio.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but every
//! module except the final paint step is plain Rust and tested natively. It
//! owns the editing session: translating pointer events into shape creation
//! and selection, authoring per-shape animations, and producing the canvas
//! drawing for the current state. The host layer wires DOM events to the
//! engine and hands the resulting [`engine::Action`]s to a
//! [`bridge::PersistenceBridge`] (scene snapshots) or repaints.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Shapes, animations, and the in-memory [`doc::Scene`] |
//! | [`geom`] | Canvas-space points |
//! | [`hit`] | Hit-testing against shapes |
//! | [`input`] | Editor state and the pointer state machine |
//! | [`timeline`] | Animation create/update/delete scoped to the selection |
//! | [`render`] | Render pass: drawing commands and canvas playback |
//! | [`bridge`] | Scene-store and render-control collaborators |
//! | [`host`] | JS-function-backed store and render control for the page |
//! | [`consts`] | Shared constants (grid step, colors, defaults) |

pub mod bridge;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod host;
pub mod input;
pub mod render;
pub mod timeline;
