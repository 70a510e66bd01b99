//! Shape → `kurbo` path conversion.
//!
//! Both renderers consume these paths, so a shape looks the same on the
//! Canvas2D fallback and under Vello.

use kurbo::{BezPath, Cap, Circle, Join, Rect, Shape as _, Stroke as KurboStroke};
use sf_core::{Outline, Shape};

/// Flattening tolerance for curved outlines, in canvas pixels.
const TOLERANCE: f64 = 0.1;

/// Build the canvas-space outline of a shape.
/// Undrawn shapes produce an empty path.
pub fn shape_path(shape: &Shape) -> BezPath {
    let (dx, dy) = (shape.x as f64, shape.y as f64);
    match &shape.outline {
        Outline::Empty => BezPath::new(),
        Outline::Rect { width, height } => {
            Rect::new(dx, dy, dx + *width as f64, dy + *height as f64).to_path(TOLERANCE)
        }
        Outline::Polygon { points } => {
            let mut path = BezPath::new();
            let mut iter = points.iter();
            if let Some(&(x, y)) = iter.next() {
                path.move_to((dx + x as f64, dy + y as f64));
                for &(x, y) in iter {
                    path.line_to((dx + x as f64, dy + y as f64));
                }
                path.close_path();
            }
            path
        }
        Outline::Circle { radius } => Circle::new((dx, dy), *radius as f64).to_path(TOLERANCE),
    }
}

/// Outline stroke in `kurbo` terms.
pub fn stroke_style(shape: &Shape) -> KurboStroke {
    KurboStroke {
        width: shape.stroke.width as f64,
        join: Join::Miter,
        start_cap: Cap::Butt,
        end_cap: Cap::Butt,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;
    use kurbo::Shape as _;
    use sf_core::{Color, ShapeId, ShapeKind, Stroke};

    fn drawn_at(kind: ShapeKind, x: f32, y: f32) -> Shape {
        let mut shape = Shape::new(ShapeId::new(kind, 1));
        shape.draw(Color::rgb(200, 100, 50), Stroke::default());
        shape.x = x;
        shape.y = y;
        shape
    }

    #[test]
    fn path_bounds_match_shape_bounds() {
        for kind in ShapeKind::ALL {
            let shape = drawn_at(kind, 120.0, 80.0);
            let bbox = shape_path(&shape).bounding_box();
            let b = shape.bounds();
            assert!((bbox.x0 - b.x as f64).abs() < 0.5, "{kind:?} x0");
            assert!((bbox.y0 - b.y as f64).abs() < 0.5, "{kind:?} y0");
            assert!((bbox.width() - b.width as f64).abs() < 0.5, "{kind:?} width");
            assert!((bbox.height() - b.height as f64).abs() < 0.5, "{kind:?} height");
        }
    }

    #[test]
    fn triangle_path_is_closed() {
        let path = shape_path(&drawn_at(ShapeKind::Triangle, 0.0, 0.0));
        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(els.len(), 4);
        assert!(matches!(els[0], PathEl::MoveTo(p) if p.x == 0.0 && p.y == 0.0));
        assert!(matches!(els[3], PathEl::ClosePath));
    }

    #[test]
    fn undrawn_shape_has_empty_path() {
        let shape = Shape::new(ShapeId::new(ShapeKind::Circle, 1));
        assert!(shape_path(&shape).elements().is_empty());
    }
}
