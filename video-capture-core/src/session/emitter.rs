use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::events::LifecycleEvent;
use crate::models::recording_result::RecordingArtifact;
use crate::models::state::RecorderState;
use crate::traits::recorder_delegate::RecorderDelegate;

/// Fire-and-forget lifecycle event delivery.
///
/// Holds at most one delegate; events emitted while none is attached are
/// dropped (no buffering or replay).
#[derive(Clone, Default)]
pub struct LifecycleEmitter {
    delegate: Arc<Mutex<Option<Arc<dyn RecorderDelegate>>>>,
}

impl LifecycleEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_delegate(&self, delegate: Arc<dyn RecorderDelegate>) {
        *self.delegate.lock() = Some(delegate);
    }

    pub fn clear_delegate(&self) {
        *self.delegate.lock() = None;
    }

    fn current(&self) -> Option<Arc<dyn RecorderDelegate>> {
        self.delegate.lock().clone()
    }

    pub fn emit(&self, code: RecorderState, message: impl Into<String>) {
        let event = LifecycleEvent::new(code, message);
        log::info!("lifecycle: {:?} ({})", event.code, event.message);
        if let Some(delegate) = self.current() {
            delegate.on_lifecycle_event(&event);
        }
    }

    pub fn notify_finished(&self, artifact: &RecordingArtifact) {
        if let Some(delegate) = self.current() {
            delegate.on_recording_finished(artifact);
        }
    }

    pub fn notify_notification(&self, title: &str, text: &str) {
        if let Some(delegate) = self.current() {
            delegate.on_notification_requested(title, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CollectingDelegate {
        events: Mutex<Vec<LifecycleEvent>>,
    }

    impl RecorderDelegate for CollectingDelegate {
        fn on_lifecycle_event(&self, event: &LifecycleEvent) {
            self.events.lock().push(event.clone());
        }

        fn on_recording_finished(&self, _artifact: &RecordingArtifact) {}
    }

    #[test]
    fn events_reach_the_attached_delegate() {
        let emitter = LifecycleEmitter::new();
        // No delegate attached: best-effort drop.
        emitter.emit(RecorderState::Initializing, "lost");

        let delegate = Arc::new(CollectingDelegate::default());
        emitter.set_delegate(delegate.clone());
        emitter.emit(RecorderState::Recording, "recording started");

        emitter.clear_delegate();
        emitter.emit(RecorderState::Stopped, "lost again");

        let events = delegate.events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].code, RecorderState::Recording);
        assert_eq!(events[0].status_code(), 1);
    }
}
