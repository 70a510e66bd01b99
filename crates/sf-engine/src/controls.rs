//! Control buttons.
//!
//! Maps DOM element ids to semantic `ControlAction`s. The map lives in Rust
//! so the page only has to forward clicks.

use sf_core::SceneController;

/// Actions the control buttons can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    GravityUp,
    GravityDown,
    ShapesUp,
    ShapesDown,
}

impl ControlAction {
    pub const ALL: [ControlAction; 4] = [
        ControlAction::GravityUp,
        ControlAction::GravityDown,
        ControlAction::ShapesUp,
        ControlAction::ShapesDown,
    ];

    /// The id of the button that triggers this action.
    pub fn element_id(self) -> &'static str {
        match self {
            ControlAction::GravityUp => "gravity-increase",
            ControlAction::GravityDown => "gravity-decrease",
            ControlAction::ShapesUp => "shapes-increase",
            ControlAction::ShapesDown => "shapes-decrease",
        }
    }

    /// Apply to the scene. Returns `true` if the value changed; a press at
    /// the edge of the range is a no-op.
    pub fn apply(self, scene: &mut SceneController) -> bool {
        let changed = match self {
            ControlAction::GravityUp => scene.increase_gravity(),
            ControlAction::GravityDown => scene.decrease_gravity(),
            ControlAction::ShapesUp => scene.increase_spawn_count(),
            ControlAction::ShapesDown => scene.decrease_spawn_count(),
        };
        if changed {
            log::debug!(
                "{self:?}: gravity={} spawn_count={}",
                scene.gravity(),
                scene.spawn_count()
            );
        }
        changed
    }
}

/// Resolves button ids into control actions.
pub struct ControlMap;

impl ControlMap {
    /// Returns `None` if the id has no binding.
    pub fn resolve(element_id: &str) -> Option<ControlAction> {
        ControlAction::ALL
            .into_iter()
            .find(|action| action.element_id() == element_id)
    }
}
