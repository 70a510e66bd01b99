//! The simulation: scene controller + scheduler + input routing.
//!
//! Everything the page does goes through `Simulation`: one `frame` call per
//! animation frame, one `handle` call per DOM event. It runs on a single
//! thread; a wave spawned during a frame is advanced in that same frame.

use crate::controls::ControlAction;
use crate::input::InputEvent;
use crate::scheduler::{Scheduler, Task};
use serde::Serialize;
use sf_core::{
    ClickOutcome, Color, CounterSink, Counters, RandomSource, SceneConfig, SceneController,
    Viewport,
};

/// What one `frame` call did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameReport {
    pub waves: u32,
    pub delta: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    shapes: usize,
    area: u64,
    gravity: u32,
    spawn_count: u32,
    viewport: Viewport,
}

pub struct Simulation {
    pub scene: SceneController,
    scheduler: Scheduler,
    config: SceneConfig,
}

impl Simulation {
    pub fn new(config: SceneConfig, rng: Box<dyn RandomSource>) -> Self {
        let config = config.normalized();
        log::info!(
            "simulation: {}x{} gravity={} spawn_count={} interval={}ms",
            config.viewport.width,
            config.viewport.height,
            config.gravity,
            config.spawn_count,
            config.spawn_interval_ms
        );
        Self {
            scene: SceneController::new(&config, rng),
            scheduler: Scheduler::new(config.spawn_interval_ms),
            config,
        }
    }

    pub fn background(&self) -> Color {
        self.config.background
    }

    pub fn set_counter_sink(&mut self, sink: Box<dyn CounterSink>) {
        self.scene.set_counter_sink(sink);
    }

    /// Run every task due at `now_ms` (a `requestAnimationFrame` timestamp).
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let mut report = FrameReport::default();
        for task in self.scheduler.poll(now_ms) {
            match task {
                Task::SpawnWave => {
                    self.scene.spawn_wave();
                    report.waves += 1;
                }
                Task::Frame { delta } => {
                    self.scene.tick(delta);
                    report.delta = delta;
                }
            }
        }
        report
    }

    /// Route one input event. Returns `true` if the scene changed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.click(x, y);
                true
            }
            InputEvent::Control(action) => self.apply_control(action),
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                true
            }
        }
    }

    pub fn click(&mut self, x: f32, y: f32) -> ClickOutcome {
        self.scene.on_canvas_click(x, y)
    }

    pub fn apply_control(&mut self, action: ControlAction) -> bool {
        action.apply(&mut self.scene)
    }

    /// Follow the canvas size. Live shapes keep their positions.
    pub fn resize(&mut self, width: f32, height: f32) {
        let viewport = Viewport { width, height };
        self.config.viewport = viewport;
        self.scene.set_viewport(viewport);
    }

    /// Restart timing, e.g. when the page becomes visible again.
    pub fn reset_clock(&mut self) {
        self.scheduler.reset();
    }

    pub fn counters(&self) -> Counters {
        self.scene.counters()
    }

    /// Counters plus the current controls, as JSON.
    pub fn stats_json(&self) -> String {
        let counters = self.scene.counters();
        let stats = Stats {
            shapes: counters.shapes,
            area: counters.area,
            gravity: self.scene.gravity(),
            spawn_count: self.scene.spawn_count(),
            viewport: self.scene.viewport(),
        };
        serde_json::to_string(&stats).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
    }
}
