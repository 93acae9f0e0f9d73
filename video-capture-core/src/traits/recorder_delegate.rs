use crate::models::events::LifecycleEvent;
use crate::models::recording_result::RecordingArtifact;

/// Event delegate for recorder lifecycle notifications.
///
/// At most one delegate is attached at a time; delivery is best-effort
/// with no buffering or replay for late subscribers. Methods are called
/// from the controller's entry points or from hardware callback threads,
/// with the controller's session lock held so transitions arrive in
/// order — implementations must not call back into the controller and
/// should marshal heavy work to their own thread.
pub trait RecorderDelegate: Send + Sync {
    /// Called at-most-once per state transition.
    fn on_lifecycle_event(&self, event: &LifecycleEvent);

    /// Called when a recording stops cleanly and the file is finalized.
    fn on_recording_finished(&self, artifact: &RecordingArtifact);

    /// Called once per accepted start so the host can raise its
    /// foreground-recording notification. The chrome itself is the
    /// host's concern.
    fn on_notification_requested(&self, _title: &str, _text: &str) {}
}
