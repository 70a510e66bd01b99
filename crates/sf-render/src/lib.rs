//! Rendering for Shapefall: shape outlines as `kurbo` paths, painted into
//! a Vello scene for GPU hosts or walked by the Canvas2D renderer in the
//! browser.

pub mod outline;
pub mod paint;

pub use outline::{shape_path, stroke_style};
pub use paint::{paint_scene, to_peniko};
