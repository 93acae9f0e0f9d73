use serde::{Deserialize, Serialize};

/// Recorder session state machine.
///
/// State transitions:
/// ```text
/// stopped → initializing → recording → stopped
///               ↓              ↓
///            exception ← ─ ─ ─ ┘   (reported once, then reset to stopped)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    Stopped,
    Initializing,
    Recording,
    Exception,
}

impl RecorderState {
    /// External status code reported to the command surface.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::Recording => 1,
            Self::Stopped => 2,
            Self::Initializing => 3,
            Self::Exception => -1,
        }
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self, Self::Initializing)
    }
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_command_surface() {
        assert_eq!(RecorderState::Recording.status_code(), 1);
        assert_eq!(RecorderState::Stopped.status_code(), 2);
        assert_eq!(RecorderState::Initializing.status_code(), 3);
        assert_eq!(RecorderState::Exception.status_code(), -1);
    }
}
