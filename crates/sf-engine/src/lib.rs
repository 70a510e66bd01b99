pub mod controls;
pub mod input;
pub mod scheduler;
pub mod simulation;

pub use controls::{ControlAction, ControlMap};
pub use input::InputEvent;
pub use scheduler::{FrameClock, IntervalTimer, Scheduler, Task};
pub use simulation::{FrameReport, Simulation};
