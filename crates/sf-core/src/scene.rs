//! Scene controller: owns every shape and the live collection.
//!
//! Shapes are addressed by `ShapeId`. Attach, detach and advance go through
//! the controller, so the live collection and the render tree can only change
//! together. Every change to the collection pushes fresh `Counters` to the
//! installed `CounterSink`.

use crate::config::SceneConfig;
use crate::id::ShapeId;
use crate::model::{Color, Viewport};
use crate::rng::RandomSource;
use crate::shape::{Shape, ShapeKind, Stroke};
use crate::stage::Stage;
use serde::Serialize;
use std::collections::HashMap;
use std::ops::RangeInclusive;

pub const GRAVITY_RANGE: RangeInclusive<u32> = 1..=10;
pub const SPAWN_COUNT_RANGE: RangeInclusive<u32> = 1..=100;

/// The two numbers shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counters {
    pub shapes: usize,
    /// Sum of `Shape::area` over live shapes, rounded to a whole number.
    pub area: u64,
}

/// Receives counter updates whenever the live collection changes.
pub trait CounterSink {
    fn update(&mut self, counters: Counters);
}

/// What a canvas click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Removed(ShapeId),
    Spawned(ShapeId),
}

pub struct SceneController {
    shapes: HashMap<ShapeId, Shape>,
    /// Live shapes in insertion order (= z-order, back to front).
    live: Vec<ShapeId>,
    stage: Stage,
    gravity: u32,
    spawn_count: u32,
    viewport: Viewport,
    stroke: Stroke,
    rng: Box<dyn RandomSource>,
    sink: Option<Box<dyn CounterSink>>,
    next_serial: u64,
}

impl SceneController {
    pub fn new(config: &SceneConfig, rng: Box<dyn RandomSource>) -> Self {
        let config = config.clone().normalized();
        Self {
            shapes: HashMap::new(),
            live: Vec::new(),
            stage: Stage::new(),
            gravity: config.gravity,
            spawn_count: config.spawn_count,
            viewport: config.viewport,
            stroke: Stroke {
                width: config.stroke_width,
                color: Color::BLACK,
            },
            rng,
            sink: None,
            next_serial: 0,
        }
    }

    /// Install the counter sink and push the current counters to it.
    pub fn set_counter_sink(&mut self, sink: Box<dyn CounterSink>) {
        self.sink = Some(sink);
        self.refresh_counters();
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn gravity(&self) -> u32 {
        self.gravity
    }

    pub fn spawn_count(&self) -> u32 {
        self.spawn_count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn is_live(&self, id: ShapeId) -> bool {
        self.stage.contains(id)
    }

    /// Live shape IDs, back to front.
    pub fn live_ids(&self) -> &[ShapeId] {
        &self.live
    }

    /// Live shapes, back to front.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.live.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn total_area(&self) -> u64 {
        let sum: f64 = self.shapes().map(Shape::area).sum();
        sum.round() as u64
    }

    pub fn counters(&self) -> Counters {
        Counters {
            shapes: self.live.len(),
            area: self.total_area(),
        }
    }

    // ─── Gravity / spawn count ───────────────────────────────────────────

    /// Returns `true` if gravity changed.
    pub fn increase_gravity(&mut self) -> bool {
        step_within(&mut self.gravity, &GRAVITY_RANGE, true)
    }

    pub fn decrease_gravity(&mut self) -> bool {
        step_within(&mut self.gravity, &GRAVITY_RANGE, false)
    }

    pub fn increase_spawn_count(&mut self) -> bool {
        step_within(&mut self.spawn_count, &SPAWN_COUNT_RANGE, true)
    }

    pub fn decrease_spawn_count(&mut self) -> bool {
        step_within(&mut self.spawn_count, &SPAWN_COUNT_RANGE, false)
    }

    // ─── Shape lifecycle ─────────────────────────────────────────────────

    /// A fresh, undrawn shape with the next id.
    pub fn make_shape(&mut self, kind: ShapeKind) -> Shape {
        let id = ShapeId::new(kind, self.next_serial);
        self.next_serial += 1;
        Shape::new(id)
    }

    /// Take ownership of a shape without attaching it.
    pub fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id;
        self.shapes.insert(id, shape);
        id
    }

    /// Attach a shape to the render tree and the live collection.
    /// Returns `false` if the shape is unknown or already attached.
    pub fn attach(&mut self, id: ShapeId) -> bool {
        let attached = self.link(id);
        if attached {
            self.refresh_counters();
        }
        attached
    }

    fn link(&mut self, id: ShapeId) -> bool {
        if !self.shapes.contains_key(&id) || !self.stage.add_child(id) {
            return false;
        }
        self.live.push(id);
        true
    }

    /// Detach and drop a shape. Safe to call on a shape that is already gone.
    pub fn detach(&mut self, id: ShapeId) -> bool {
        let was_attached = self.stage.remove_child(id);
        if let Some(pos) = self.live.iter().position(|live| *live == id) {
            self.live.remove(pos);
        }
        // Pointer handling is hit-tested per click, so there is no
        // per-shape listener left to drop.
        let existed = self.shapes.remove(&id).is_some();
        if was_attached || existed {
            log::debug!("detached {id}");
            self.refresh_counters();
        }
        was_attached
    }

    /// Move one shape by the current gravity. A shape that falls past the
    /// bottom edge is detached. Returns `true` while the shape stays live.
    pub fn advance(&mut self, id: ShapeId, delta: f32) -> bool {
        let gravity = self.gravity as f32;
        let viewport = self.viewport;
        let past_bottom = match self.shapes.get_mut(&id) {
            Some(shape) => shape.advance(delta, gravity, viewport),
            None => return false,
        };
        if past_bottom {
            self.detach(id);
            return false;
        }
        true
    }

    /// Advance every live shape by one frame.
    pub fn tick(&mut self, delta: f32) {
        let ids = self.live.clone();
        for id in ids {
            self.advance(id, delta);
        }
    }

    /// Spawn one shape of a random kind and colour. With a point it lands
    /// there; without one it enters from above the top edge.
    pub fn spawn_shape(&mut self, at: Option<(f32, f32)>) -> ShapeId {
        let id = self.spawn_unrefreshed(at);
        self.refresh_counters();
        id
    }

    /// Spawn `spawn_count` shapes along the top edge. Counters refresh once
    /// for the whole wave.
    pub fn spawn_wave(&mut self) -> Vec<ShapeId> {
        let ids: Vec<ShapeId> = (0..self.spawn_count)
            .map(|_| self.spawn_unrefreshed(None))
            .collect();
        self.refresh_counters();
        log::debug!("wave of {} shapes, {} live", ids.len(), self.live.len());
        ids
    }

    fn spawn_unrefreshed(&mut self, at: Option<(f32, f32)>) -> ShapeId {
        let kind = ShapeKind::random(self.rng.as_mut());
        let color = Color::random(self.rng.as_mut());

        let mut shape = self.make_shape(kind);
        shape.draw(color, self.stroke);
        let id = self.insert(shape);
        self.link(id);

        let viewport = self.viewport;
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.set_coordinates(at, viewport, self.rng.as_mut());
            log::debug!(
                "spawned {id} {:?} at ({:.1}, {:.1})",
                color,
                shape.x,
                shape.y
            );
        }
        id
    }

    /// First live shape, in insertion order, whose bounds contain the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ShapeId> {
        self.shapes()
            .find(|shape| shape.bounds().contains(x, y))
            .map(|shape| shape.id)
    }

    /// Remove the shape under the pointer, or spawn one there.
    pub fn on_canvas_click(&mut self, x: f32, y: f32) -> ClickOutcome {
        match self.hit_test(x, y) {
            Some(id) => {
                self.detach(id);
                ClickOutcome::Removed(id)
            }
            None => ClickOutcome::Spawned(self.spawn_shape(Some((x, y)))),
        }
    }

    /// Drop every shape.
    pub fn clear(&mut self) {
        self.stage.clear();
        self.live.clear();
        self.shapes.clear();
        self.refresh_counters();
    }

    fn refresh_counters(&mut self) {
        let counters = self.counters();
        if let Some(sink) = self.sink.as_mut() {
            sink.update(counters);
        }
    }
}

fn step_within(value: &mut u32, range: &RangeInclusive<u32>, up: bool) -> bool {
    let next = if up {
        value.saturating_add(1)
    } else {
        value.saturating_sub(1)
    };
    if range.contains(&next) {
        *value = next;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SplitMix64;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<Counters>>>);

    impl CounterSink for Recorder {
        fn update(&mut self, counters: Counters) {
            self.0.borrow_mut().push(counters);
        }
    }

    fn controller() -> SceneController {
        SceneController::new(&SceneConfig::default(), Box::new(SplitMix64::new(5)))
    }

    fn place(scene: &mut SceneController, kind: ShapeKind, x: f32, y: f32) -> ShapeId {
        let mut shape = scene.make_shape(kind);
        shape.draw(Color::rgb(1, 2, 3), Stroke::default());
        shape.x = x;
        shape.y = y;
        let id = scene.insert(shape);
        scene.attach(id);
        id
    }

    #[test]
    fn gravity_stays_in_range() {
        let mut scene = controller();
        assert!(!scene.decrease_gravity());
        assert_eq!(scene.gravity(), 1);
        for _ in 0..20 {
            scene.increase_gravity();
        }
        assert_eq!(scene.gravity(), 10);
        assert!(!scene.increase_gravity());
    }

    #[test]
    fn spawn_count_stays_in_range() {
        let mut scene = controller();
        for _ in 0..150 {
            scene.increase_spawn_count();
        }
        assert_eq!(scene.spawn_count(), 100);
        for _ in 0..150 {
            scene.decrease_spawn_count();
        }
        assert_eq!(scene.spawn_count(), 1);
    }

    #[test]
    fn attach_happens_once() {
        let mut scene = controller();
        let id = place(&mut scene, ShapeKind::Rectangle, 0.0, 0.0);
        assert!(!scene.attach(id));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut scene = controller();
        let id = place(&mut scene, ShapeKind::Circle, 50.0, 50.0);
        assert!(scene.detach(id));
        assert!(!scene.detach(id));
        assert!(scene.is_empty());
        assert!(scene.stage().is_empty());
    }

    #[test]
    fn advance_past_bottom_detaches() {
        let mut scene = controller();
        let id = place(&mut scene, ShapeKind::Rectangle, 10.0, 599.0);
        assert!(!scene.advance(id, 2.0));
        assert!(!scene.is_live(id));
        assert!(scene.get(id).is_none());
    }

    #[test]
    fn tick_moves_all_live_shapes() {
        let mut scene = controller();
        scene.increase_gravity();
        let a = place(&mut scene, ShapeKind::Rectangle, 0.0, 0.0);
        let b = place(&mut scene, ShapeKind::Triangle, 100.0, 10.0);
        scene.tick(1.5);
        assert_eq!(scene.get(a).map(|s| s.y), Some(3.0));
        assert_eq!(scene.get(b).map(|s| s.y), Some(13.0));
    }

    #[test]
    fn hit_test_prefers_first_inserted() {
        let mut scene = controller();
        let first = place(&mut scene, ShapeKind::Rectangle, 0.0, 0.0);
        let _second = place(&mut scene, ShapeKind::Rectangle, 10.0, 10.0);
        assert_eq!(scene.hit_test(20.0, 20.0), Some(first));
        assert_eq!(scene.hit_test(500.0, 500.0), None);
    }

    #[test]
    fn click_removes_or_spawns() {
        let mut scene = controller();
        let id = place(&mut scene, ShapeKind::Rectangle, 100.0, 100.0);

        assert_eq!(scene.on_canvas_click(110.0, 110.0), ClickOutcome::Removed(id));
        assert!(scene.is_empty());

        match scene.on_canvas_click(300.0, 200.0) {
            ClickOutcome::Spawned(new_id) => {
                let shape = scene.get(new_id).expect("spawned shape");
                assert_eq!((shape.x, shape.y), (300.0, 200.0));
            }
            other => panic!("expected spawn, got {other:?}"),
        }
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn counters_follow_the_collection() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = controller();
        scene.set_counter_sink(Box::new(Recorder(log.clone())));

        let rect = place(&mut scene, ShapeKind::Rectangle, 0.0, 0.0);
        place(&mut scene, ShapeKind::Circle, 200.0, 200.0);
        scene.detach(rect);

        assert_eq!(
            *log.borrow(),
            vec![
                Counters { shapes: 0, area: 0 },
                Counters {
                    shapes: 1,
                    area: 2100
                },
                Counters {
                    shapes: 2,
                    area: 4063
                },
                Counters {
                    shapes: 1,
                    area: 1963
                },
            ]
        );
    }

    #[test]
    fn spawned_shapes_are_drawn_and_live() {
        let mut scene = controller();
        let id = scene.spawn_shape(None);
        let shape = scene.get(id).expect("spawned shape");
        assert!(shape.area() > 0.0);
        assert_eq!(shape.y, -shape.height());
        assert!(scene.stage().contains(id));
    }

    #[test]
    fn wave_refreshes_counters_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scene = controller();
        for _ in 0..4 {
            scene.increase_spawn_count();
        }
        scene.set_counter_sink(Box::new(Recorder(log.clone())));
        scene.spawn_wave();

        let updates = log.borrow();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1].shapes, 5);
        assert_eq!(updates[1], scene.counters());
    }

    #[test]
    fn spawn_detach_cycles_leave_nothing_behind() {
        let mut scene = controller();
        let mut last = None;
        for _ in 0..10_000 {
            let id = scene.spawn_shape(None);
            assert!(scene.detach(id));
            last = Some(id);
        }
        assert!(scene.is_empty());
        assert!(scene.stage().is_empty());
        assert_eq!(scene.counters(), Counters::default());
        let last = last.expect("spawned");
        assert!(scene.get(last).is_none());
        assert_eq!(last.serial(), 9_999);
    }
}
