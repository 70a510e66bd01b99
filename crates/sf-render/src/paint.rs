//! Scene controller → Vello drawing commands.
//!
//! Paints the background, then every live shape back to front: fill first,
//! outline stroke on top.

use crate::outline::{shape_path, stroke_style};
use kurbo::{Affine, Rect};
use peniko::{Color, Fill};
use sf_core::{SceneController, Shape};
use vello::Scene;

/// Paint the whole scene into a Vello scene.
///
/// Call once per frame with a freshly-cleared `Scene`.
/// The caller presents the scene via wgpu.
pub fn paint_scene(scene: &mut Scene, controller: &SceneController, background: sf_core::Color) {
    let viewport = controller.viewport();
    let bg = Rect::new(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    scene.fill(Fill::NonZero, Affine::IDENTITY, to_peniko(background), None, &bg);

    for shape in controller.shapes() {
        paint_shape(scene, shape);
    }
}

fn paint_shape(scene: &mut Scene, shape: &Shape) {
    let path = shape_path(shape);
    if path.elements().is_empty() {
        return;
    }
    log::trace!(
        "PAINT {} {:?} at ({}, {})",
        shape.id,
        shape.kind,
        shape.x,
        shape.y
    );
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        to_peniko(shape.fill),
        None,
        &path,
    );
    if shape.stroke.width > 0.0 {
        scene.stroke(
            &stroke_style(shape),
            Affine::IDENTITY,
            to_peniko(shape.stroke.color),
            None,
            &path,
        );
    }
}

pub fn to_peniko(color: sf_core::Color) -> Color {
    Color::from_rgb8(color.r, color.g, color.b)
}
