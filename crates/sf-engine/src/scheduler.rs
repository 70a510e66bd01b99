//! Cooperative, timestamp-driven task scheduling.
//!
//! The browser hands us one timestamp per animation frame. From it the
//! scheduler derives two tasks:
//!
//! - **SpawnWave**: fires every `spawn_interval_ms`
//! - **Frame**: fires every poll with the elapsed time as a delta
//!
//! Deltas are measured in 60 fps frames, so `1.0` is one frame at 60 fps and
//! a shape at gravity `g` falls `g` pixels per frame at that rate.

use smallvec::SmallVec;

/// Milliseconds in one 60 fps frame.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Longest delta a single frame may report (a 10 fps floor), so a tab that
/// was in the background does not teleport every shape off screen.
pub const MAX_DELTA: f32 = 6.0;

/// Converts frame timestamps into deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous call, in 60 fps frames. The first call
    /// returns `0.0`. Timestamps that go backwards count as no time.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => ((now_ms - last).max(0.0) / FRAME_MS) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        delta.min(MAX_DELTA)
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Fixed-period timer polled from the frame loop.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval_ms: f64,
    next_due_ms: Option<f64>,
}

impl IntervalTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    /// Returns `true` when a period has elapsed. The first period starts at
    /// the first poll. At most one firing per poll: after a long stall the
    /// timer restarts from `now_ms` instead of firing a backlog.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let Some(due) = self.next_due_ms else {
            self.next_due_ms = Some(now_ms + self.interval_ms);
            return false;
        };
        if now_ms < due {
            return false;
        }
        let next = due + self.interval_ms;
        self.next_due_ms = Some(if next <= now_ms {
            now_ms + self.interval_ms
        } else {
            next
        });
        true
    }

    pub fn reset(&mut self) {
        self.next_due_ms = None;
    }
}

/// A unit of work produced by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    SpawnWave,
    Frame { delta: f32 },
}

/// Composes the spawn timer and the frame clock.
#[derive(Debug, Clone)]
pub struct Scheduler {
    clock: FrameClock,
    spawn_timer: IntervalTimer,
}

impl Scheduler {
    pub fn new(spawn_interval_ms: u32) -> Self {
        Self {
            clock: FrameClock::new(),
            spawn_timer: IntervalTimer::new(spawn_interval_ms as f64),
        }
    }

    /// Tasks due at `now_ms`, in run order: a spawn wave (if due) then the
    /// frame update.
    pub fn poll(&mut self, now_ms: f64) -> SmallVec<[Task; 2]> {
        let mut tasks = SmallVec::new();
        if self.spawn_timer.poll(now_ms) {
            tasks.push(Task::SpawnWave);
        }
        tasks.push(Task::Frame {
            delta: self.clock.delta(now_ms),
        });
        tasks
    }

    /// Forget all timing state; the next poll starts fresh.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.spawn_timer.reset();
    }
}
