//! The three falling shape kinds and their geometry.
//!
//! A `Shape` carries its drawn outline in local coordinates plus a position
//! on the canvas. Outlines are fixed per kind:
//!
//! - Rectangle: `70 × 30`, anchored at its top-left corner
//! - Triangle: `(0,0) → (70,20) → (20,70)`, closed
//! - Circle: radius `25`, centred on the position

use crate::id::ShapeId;
use crate::model::{Bounds, Color, Viewport};
use crate::rng::RandomSource;
use serde::Serialize;
use smallvec::{SmallVec, smallvec};

pub const RECT_WIDTH: f32 = 70.0;
pub const RECT_HEIGHT: f32 = 30.0;
pub const TRIANGLE_POINTS: [(f32, f32); 3] = [(0.0, 0.0), (70.0, 20.0), (20.0, 70.0)];
pub const CIRCLE_RADIUS: f32 = 25.0;

/// The closed set of shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Triangle,
    Circle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Triangle, ShapeKind::Circle, ShapeKind::Rectangle];

    /// Pick a kind uniformly at random.
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.pick_index(Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Circle => "circle",
        }
    }
}

/// Drawn geometry in shape-local coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outline {
    /// Not drawn yet.
    Empty,
    Rect { width: f32, height: f32 },
    /// Closed polygon; vertex order is the drawing order.
    Polygon { points: SmallVec<[(f32, f32); 4]> },
    Circle { radius: f32 },
}

impl Outline {
    /// Axis-aligned bounds in local coordinates.
    pub fn local_bounds(&self) -> Bounds {
        match self {
            Outline::Empty => Bounds::default(),
            Outline::Rect { width, height } => Bounds {
                x: 0.0,
                y: 0.0,
                width: *width,
                height: *height,
            },
            Outline::Polygon { points } => {
                let Some(&(fx, fy)) = points.first() else {
                    return Bounds::default();
                };
                let (mut min_x, mut min_y, mut max_x, mut max_y) = (fx, fy, fx, fy);
                for &(px, py) in points.iter().skip(1) {
                    min_x = min_x.min(px);
                    min_y = min_y.min(py);
                    max_x = max_x.max(px);
                    max_y = max_y.max(py);
                }
                Bounds {
                    x: min_x,
                    y: min_y,
                    width: max_x - min_x,
                    height: max_y - min_y,
                }
            }
            Outline::Circle { radius } => Bounds {
                x: -radius,
                y: -radius,
                width: radius * 2.0,
                height: radius * 2.0,
            },
        }
    }
}

/// Outline stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::BLACK,
        }
    }
}

/// A single falling shape.
#[derive(Debug, Clone, Serialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub fill: Color,
    pub stroke: Stroke,
    pub outline: Outline,
    /// Position of the local origin on the canvas.
    pub x: f32,
    pub y: f32,
}

impl Shape {
    /// Create an undrawn shape at the origin; the kind comes from the id.
    pub fn new(id: ShapeId) -> Self {
        Self {
            id,
            kind: id.kind(),
            fill: Color::BLACK,
            stroke: Stroke::default(),
            outline: Outline::Empty,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Build the outline for this kind, filled with `color`.
    pub fn draw(&mut self, color: Color, stroke: Stroke) {
        self.fill = color;
        self.stroke = stroke;
        self.outline = match self.kind {
            ShapeKind::Rectangle => Outline::Rect {
                width: RECT_WIDTH,
                height: RECT_HEIGHT,
            },
            ShapeKind::Triangle => Outline::Polygon {
                points: smallvec![TRIANGLE_POINTS[0], TRIANGLE_POINTS[1], TRIANGLE_POINTS[2]],
            },
            ShapeKind::Circle => Outline::Circle {
                radius: CIRCLE_RADIUS,
            },
        };
    }

    pub fn width(&self) -> f32 {
        self.outline.local_bounds().width
    }

    pub fn height(&self) -> f32 {
        self.outline.local_bounds().height
    }

    /// Bounding box on the canvas.
    pub fn bounds(&self) -> Bounds {
        self.outline.local_bounds().translate(self.x, self.y)
    }

    /// Place the shape. With a point it lands exactly there; without one it
    /// gets a random x across the viewport and sits one height above the
    /// top edge, ready to fall into view.
    pub fn set_coordinates(
        &mut self,
        at: Option<(f32, f32)>,
        viewport: Viewport,
        rng: &mut dyn RandomSource,
    ) {
        match at {
            Some((x, y)) => {
                self.x = x;
                self.y = y;
            }
            None => {
                let span = (viewport.width - self.width()).max(0.0);
                self.x = rng.uniform(span as f64) as f32;
                self.y = -self.height();
            }
        }
    }

    /// Move down by `gravity * delta`. Returns `true` once the shape is
    /// below the bottom of the viewport.
    pub fn advance(&mut self, delta: f32, gravity: f32, viewport: Viewport) -> bool {
        self.y += gravity * delta;
        self.y > viewport.height
    }

    /// Area of the drawn geometry, 0 when the geometry is degenerate.
    pub fn area(&self) -> f64 {
        match &self.outline {
            Outline::Empty => 0.0,
            Outline::Rect { width, height } => {
                if *width != 0.0 && *height != 0.0 {
                    *width as f64 * *height as f64
                } else {
                    0.0
                }
            }
            // Half of |x2 - x1| × |y3 - y1| over the first three vertices.
            // A bounding approximation, not the shoelace area.
            Outline::Polygon { points } => match points.as_slice() {
                [(x1, y1), (x2, _), (_, y3), ..] => {
                    let base = (x2 - x1).abs() as f64;
                    let height = (y3 - y1).abs() as f64;
                    0.5 * base * height
                }
                _ => 0.0,
            },
            Outline::Circle { .. } => {
                let radius = self.width() as f64 / 2.0;
                if radius != 0.0 {
                    (std::f64::consts::PI * radius * radius).floor()
                } else {
                    0.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;

    fn drawn(kind: ShapeKind) -> Shape {
        let mut shape = Shape::new(ShapeId::new(kind, 0));
        shape.draw(Color::rgb(10, 20, 30), Stroke::default());
        shape
    }

    #[test]
    fn rectangle_area() {
        assert_eq!(drawn(ShapeKind::Rectangle).area(), 2100.0);
    }

    #[test]
    fn circle_area_is_floored() {
        assert_eq!(drawn(ShapeKind::Circle).area(), 1963.0);
    }

    #[test]
    fn triangle_area_uses_vertex_spans() {
        assert_eq!(drawn(ShapeKind::Triangle).area(), 2450.0);
    }

    #[test]
    fn undrawn_shapes_have_no_area() {
        for kind in ShapeKind::ALL {
            assert_eq!(Shape::new(ShapeId::new(kind, 0)).area(), 0.0, "{kind:?}");
        }
    }

    #[test]
    fn degenerate_geometry_has_no_area() {
        let mut rect = drawn(ShapeKind::Rectangle);
        rect.outline = Outline::Rect {
            width: 70.0,
            height: 0.0,
        };
        assert_eq!(rect.area(), 0.0);

        let mut circle = drawn(ShapeKind::Circle);
        circle.outline = Outline::Circle { radius: 0.0 };
        assert_eq!(circle.area(), 0.0);

        let mut tri = drawn(ShapeKind::Triangle);
        tri.outline = Outline::Polygon {
            points: smallvec![(0.0, 0.0), (5.0, 5.0)],
        };
        assert_eq!(tri.area(), 0.0);
    }

    #[test]
    fn circle_bounds_are_centred() {
        let mut circle = drawn(ShapeKind::Circle);
        circle.x = 100.0;
        circle.y = 100.0;
        let b = circle.bounds();
        assert_eq!((b.x, b.y, b.width, b.height), (75.0, 75.0, 50.0, 50.0));
    }

    #[test]
    fn explicit_coordinates_are_exact() {
        let mut rng = SplitMix64::new(1);
        let mut rect = drawn(ShapeKind::Rectangle);
        rect.set_coordinates(Some((12.5, 40.0)), Viewport::default(), &mut rng);
        assert_eq!((rect.x, rect.y), (12.5, 40.0));
    }

    #[test]
    fn default_entrance_is_above_the_top_edge() {
        let mut rng = SplitMix64::new(2);
        let viewport = Viewport::default();
        for _ in 0..200 {
            let mut tri = drawn(ShapeKind::Triangle);
            tri.set_coordinates(None, viewport, &mut rng);
            assert_eq!(tri.y, -70.0);
            assert!(tri.x >= 0.0 && tri.x < viewport.width - 70.0);
        }
    }

    #[test]
    fn advance_moves_down_by_gravity_times_delta() {
        let mut rect = drawn(ShapeKind::Rectangle);
        let viewport = Viewport::default();
        let gone = rect.advance(2.0, 3.0, viewport);
        assert_eq!(rect.y, 6.0);
        assert!(!gone);

        rect.y = viewport.height - 1.0;
        assert!(rect.advance(1.0, 2.0, viewport));
    }
}
