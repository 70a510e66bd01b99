//! Canvas2D software renderer.
//!
//! Draws the live shapes to an HTML `<canvas>` via
//! `CanvasRenderingContext2d`, replaying the same `kurbo` outlines the Vello
//! painter uses.

use kurbo::{BezPath, PathEl};
use sf_core::{Color, SceneController, Shape};
use sf_render::shape_path;
use web_sys::CanvasRenderingContext2d;

/// Render the whole scene, back to front.
pub fn render_scene(
    ctx: &CanvasRenderingContext2d,
    scene: &SceneController,
    background: Color,
    canvas_width: f64,
    canvas_height: f64,
) {
    // Clear canvas
    ctx.set_fill_style_str(&background.to_hex());
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    for shape in scene.shapes() {
        draw_shape(ctx, shape);
    }
}

fn draw_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) {
    let path = shape_path(shape);
    if path.elements().is_empty() {
        return;
    }

    ctx.save();
    trace_path(ctx, &path);
    ctx.set_fill_style_str(&shape.fill.to_hex());
    ctx.fill();

    if shape.stroke.width > 0.0 {
        ctx.set_stroke_style_str(&shape.stroke.color.to_hex());
        ctx.set_line_width(shape.stroke.width as f64);
        ctx.stroke();
    }
    ctx.restore();
}

fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}
