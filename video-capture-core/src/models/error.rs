use thiserror::Error;

/// Errors that can occur during video recording operations.
///
/// Subsystem failures (device, encoder, session) are never retried: they
/// transition the controller to `Exception`, release every held resource,
/// and emit exactly one EXCEPTION event. Protocol misuse (double start,
/// stop out of turn) is rejected at the entry point without mutating
/// session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("camera or microphone permission denied")]
    PermissionDenied,

    #[error("no capture device matches the requested facing")]
    DeviceNotFound,

    #[error("encoder configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("capture device lost: {0}")]
    HardwareDisconnected(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("capture protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("recording already in progress")]
    AlreadyRecording,

    #[error("recording already stopped")]
    NotRecording,

    #[error("recorder is still initializing")]
    StillInitializing,
}
