use serde::{Deserialize, Serialize};

use super::state::RecorderState;

/// A state-change notification delivered to the external controller.
///
/// Transient, not persisted, delivered at-most-once per transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub code: RecorderState,
    pub message: String,
}

impl LifecycleEvent {
    pub fn new(code: RecorderState, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// External status code for the event, matching the command surface.
    pub fn status_code(&self) -> i32 {
        self.code.status_code()
    }
}
