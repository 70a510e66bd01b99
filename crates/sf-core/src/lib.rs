pub mod config;
pub mod id;
pub mod model;
pub mod rng;
pub mod scene;
pub mod shape;
pub mod stage;

pub use config::SceneConfig;
pub use id::ShapeId;
pub use model::{Bounds, Color, Viewport};
pub use rng::{RandomSource, SplitMix64};
pub use scene::{
    ClickOutcome, CounterSink, Counters, GRAVITY_RANGE, SPAWN_COUNT_RANGE, SceneController,
};
pub use shape::{Outline, Shape, ShapeKind, Stroke};
pub use stage::Stage;
