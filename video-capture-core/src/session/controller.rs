//! Top-level recording session state machine.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::models::camera::{CaptureGeometry, LensFacing};
use crate::models::config::RecordingOptions;
use crate::models::error::RecorderError;
use crate::models::recording_result::{RecordingArtifact, RecordingMetadata};
use crate::models::state::RecorderState;
use crate::session::coordinator::CaptureSessionCoordinator;
use crate::session::emitter::LifecycleEmitter;
use crate::session::{device_selector, encoder_config};
use crate::storage::output_target::OutputTarget;
use crate::traits::camera_provider::{
    CameraHandle, CameraProvider, CaptureSessionHandle, DeviceObserver, SessionObserver,
};
use crate::traits::recorder_delegate::RecorderDelegate;
use crate::traits::video_encoder::{EncoderFactory, InputSurface, VideoEncoder};

/// The single active recording attempt.
struct SessionRecord {
    device_id: String,
    geometry: CaptureGeometry,
    orientation_hint: u32,
    facing: LensFacing,
    folder_label: String,
    output_path: PathBuf,
    recording_since: Option<Instant>,
}

/// Mutable controller state, guarded by one mutual-exclusion domain.
///
/// Both the public entry points and the hardware callbacks go through
/// this lock; `generation` tags each attempt so callbacks registered by
/// a torn-down attempt are ignored.
struct ControllerInner {
    state: RecorderState,
    generation: u64,
    coordinator: CaptureSessionCoordinator,
    encoder: Option<Box<dyn VideoEncoder>>,
    pending_surface: Option<InputSurface>,
    session: Option<SessionRecord>,
}

impl ControllerInner {
    fn new() -> Self {
        Self {
            state: RecorderState::Stopped,
            generation: 0,
            coordinator: CaptureSessionCoordinator::new(),
            encoder: None,
            pending_surface: None,
            session: None,
        }
    }
}

/// Snapshot of controller state for debugging and invariant checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerDiagnostics {
    pub state: RecorderState,
    pub holds_device: bool,
    pub holds_session: bool,
}

/// Owns the recording session lifecycle: serializes start/stop requests
/// against asynchronous hardware callbacks and emits lifecycle events.
///
/// Exactly one session may be in flight; a start while one exists is
/// rejected synchronously, never queued. Cheap to clone — clones share
/// the same session.
#[derive(Clone)]
pub struct RecorderController {
    provider: Arc<dyn CameraProvider>,
    encoders: Arc<dyn EncoderFactory>,
    inner: Arc<Mutex<ControllerInner>>,
    emitter: LifecycleEmitter,
}

impl RecorderController {
    pub fn new(provider: Arc<dyn CameraProvider>, encoders: Arc<dyn EncoderFactory>) -> Self {
        Self {
            provider,
            encoders,
            inner: Arc::new(Mutex::new(ControllerInner::new())),
            emitter: LifecycleEmitter::new(),
        }
    }

    pub fn set_delegate(&self, delegate: Arc<dyn RecorderDelegate>) {
        self.emitter.set_delegate(delegate);
    }

    pub fn clear_delegate(&self) {
        self.emitter.clear_delegate();
    }

    pub fn state(&self) -> RecorderState {
        self.inner.lock().state
    }

    /// External status code: 1 recording, 2 stopped, 3 initializing,
    /// -1 exception.
    pub fn status(&self) -> i32 {
        self.state().status_code()
    }

    pub fn diagnostics(&self) -> ControllerDiagnostics {
        let inner = self.inner.lock();
        ControllerDiagnostics {
            state: inner.state,
            holds_device: inner.coordinator.holds_device(),
            holds_session: inner.coordinator.holds_session(),
        }
    }

    /// Begin a recording session.
    ///
    /// Accepted only from `Stopped`; the session then either reaches
    /// `Recording` through the device and session callbacks or fails
    /// into `Exception` and resets. There is no mid-initialization
    /// cancellation.
    pub fn start(&self, options: RecordingOptions) -> Result<(), RecorderError> {
        options
            .validate()
            .map_err(RecorderError::ConfigurationFailed)?;

        let generation = {
            let mut inner = self.inner.lock();
            if !inner.state.is_stopped() {
                return Err(RecorderError::AlreadyRecording);
            }
            inner.state = RecorderState::Initializing;
            inner.generation += 1;
            log::info!(
                "recorder initializing ({:?} camera, folder {:?})",
                options.facing,
                options.folder_label
            );
            // Events are emitted under the lock so transitions observed
            // by the delegate are totally ordered across threads.
            self.emitter
                .emit(RecorderState::Initializing, "Initializing recorder");
            self.emitter
                .notify_notification(&options.notification_title, &options.notification_text);
            inner.generation
        };

        if let Err(err) = self.begin_session(generation, &options) {
            self.fail_session(generation, &err);
            return Err(err);
        }
        Ok(())
    }

    /// Stop the active recording and return the output file path.
    ///
    /// Synchronous: waits for the encoder flush to complete. Rejected
    /// with `StillInitializing` while the session callbacks are still in
    /// flight — stopping mid-initialization is deliberately unsupported.
    pub fn stop(&self) -> Result<PathBuf, RecorderError> {
        enum Outcome {
            Finished(RecordingArtifact),
            Failed(RecorderError),
        }

        let outcome = {
            let mut inner = self.inner.lock();
            match inner.state {
                RecorderState::Recording => {}
                RecorderState::Initializing => return Err(RecorderError::StillInitializing),
                _ => return Err(RecorderError::NotRecording),
            }

            let Some(mut encoder) = inner.encoder.take() else {
                return Err(RecorderError::ProtocolViolation(
                    "recording state without a prepared encoder".into(),
                ));
            };

            let flush = encoder.stop();
            if flush.is_err() {
                encoder.release();
            }
            inner.coordinator.stop_and_close();
            let record = inner.session.take();
            // Invalidate any callback still in flight for this attempt.
            inner.generation += 1;

            match (flush, record) {
                (Ok(()), Some(record)) => {
                    inner.state = RecorderState::Stopped;
                    log::info!("recording stopped: {}", record.output_path.display());
                    self.emitter
                        .emit(RecorderState::Stopped, "Recording stopped");
                    let duration_secs = record
                        .recording_since
                        .map(|since| since.elapsed().as_secs_f64())
                        .unwrap_or(0.0);
                    let metadata = RecordingMetadata::new(
                        &record.output_path.to_string_lossy(),
                        duration_secs,
                        &record.device_id,
                        record.geometry,
                        record.orientation_hint,
                        record.facing,
                        &record.folder_label,
                    );
                    Outcome::Finished(RecordingArtifact {
                        file_path: record.output_path,
                        duration_secs,
                        metadata,
                    })
                }
                (Err(err), _) => {
                    self.report_exception_locked(&mut inner, &err);
                    Outcome::Failed(err)
                }
                (Ok(()), None) => {
                    let err = RecorderError::ProtocolViolation(
                        "recording state without a session record".into(),
                    );
                    self.report_exception_locked(&mut inner, &err);
                    Outcome::Failed(err)
                }
            }
        };

        match outcome {
            Outcome::Finished(artifact) => {
                if let Err(err) = artifact.metadata.save(&artifact.file_path) {
                    log::warn!("failed to write metadata sidecar: {}", err);
                }
                self.emitter.notify_finished(&artifact);
                Ok(artifact.file_path)
            }
            Outcome::Failed(err) => Err(err),
        }
    }

    /// Synchronous phase of session start: permission check, device
    /// selection, output claim, encoder prepare, then the asynchronous
    /// device open.
    fn begin_session(
        &self,
        generation: u64,
        options: &RecordingOptions,
    ) -> Result<(), RecorderError> {
        if !self.provider.permissions_granted() {
            return Err(RecorderError::PermissionDenied);
        }

        let descriptor = device_selector::select_device(self.provider.as_ref(), options.facing)?;
        let rotation = self.provider.display_rotation();
        let target = OutputTarget::create(&options.storage_root, &options.folder_label)?;
        let settings =
            encoder_config::derive_settings(&descriptor, rotation, target.file_path.clone())?;

        let mut encoder = self.encoders.create_encoder();
        let surface = encoder.prepare(&settings)?;

        {
            let mut inner = self.inner.lock();
            if inner.generation != generation {
                // Torn down while we were preparing; nothing to undo
                // beyond the encoder we still own.
                encoder.release();
                return Ok(());
            }
            inner.encoder = Some(encoder);
            inner.pending_surface = Some(surface);
            inner.session = Some(SessionRecord {
                device_id: descriptor.id.clone(),
                geometry: settings.geometry,
                orientation_hint: settings.orientation_hint,
                facing: options.facing,
                folder_label: options.folder_label.clone(),
                output_path: target.file_path,
                recording_since: None,
            });
        }

        let observer = Arc::new(DeviceCallbacks {
            controller: self.clone(),
            generation,
        });
        self.provider.open_device(&descriptor.id, observer)
    }

    /// Device-opened callback: bind the stashed encoder surface into a
    /// capture session on the new device.
    fn handle_device_opened(&self, generation: u64, device: Box<dyn CameraHandle>) {
        let bind_result = {
            let mut inner = self.inner.lock();
            if inner.generation != generation || !inner.state.is_initializing() {
                // Stale callback from an attempt already torn down.
                let mut device = device;
                device.close();
                return;
            }
            inner.coordinator.attach_device(device);

            match inner.pending_surface.take() {
                Some(surface) => {
                    let observer = Arc::new(SessionCallbacks {
                        controller: self.clone(),
                        generation,
                    });
                    inner.coordinator.bind_and_start(surface, observer)
                }
                None => Err(RecorderError::ProtocolViolation(
                    "device opened without a pending encoder surface".into(),
                )),
            }
        };

        if let Err(err) = bind_result {
            self.fail_session(generation, &err);
        }
    }

    /// Session-configured callback: issue the repeating request, start
    /// the encoder, and enter `Recording`.
    fn handle_session_configured(&self, generation: u64, session: Box<dyn CaptureSessionHandle>) {
        let start_result = {
            let mut inner = self.inner.lock();
            if inner.generation != generation || !inner.state.is_initializing() {
                let mut session = session;
                session.close();
                return;
            }

            let result = inner.coordinator.activate(session).and_then(|()| {
                inner.encoder.as_mut().map(|e| e.start()).unwrap_or_else(|| {
                    Err(RecorderError::ProtocolViolation(
                        "session configured without a prepared encoder".into(),
                    ))
                })
            });

            if result.is_ok() {
                inner.state = RecorderState::Recording;
                if let Some(record) = inner.session.as_mut() {
                    record.recording_since = Some(Instant::now());
                }
                log::info!("recording started");
                self.emitter
                    .emit(RecorderState::Recording, "Recording started");
            }
            result
        };

        if let Err(err) = start_result {
            self.fail_session(generation, &err);
        }
    }

    /// Single failure path for every subsystem error: release all
    /// resources idempotently, report one EXCEPTION, reset to `Stopped`.
    fn fail_session(&self, generation: u64, err: &RecorderError) {
        let mut inner = self.inner.lock();
        if inner.generation != generation {
            // A newer attempt owns the controller; this failure belongs
            // to an attempt already torn down.
            return;
        }
        inner.generation += 1;
        if let Some(mut encoder) = inner.encoder.take() {
            encoder.release();
        }
        inner.pending_surface = None;
        inner.coordinator.stop_and_close();
        inner.session = None;
        self.report_exception_locked(&mut inner, err);
    }

    /// Report one EXCEPTION event, then implicitly re-enter `Stopped` so
    /// a subsequent start can be attempted.
    fn report_exception_locked(&self, inner: &mut ControllerInner, err: &RecorderError) {
        log::error!("recording session failed: {}", err);
        inner.state = RecorderState::Exception;
        self.emitter.emit(
            RecorderState::Exception,
            format!("An exception occurred in the recording session: {}", err),
        );
        inner.state = RecorderState::Stopped;
    }
}

struct DeviceCallbacks {
    controller: RecorderController,
    generation: u64,
}

impl DeviceObserver for DeviceCallbacks {
    fn on_opened(&self, device: Box<dyn CameraHandle>) {
        self.controller.handle_device_opened(self.generation, device);
    }

    fn on_disconnected(&self) {
        self.controller.fail_session(
            self.generation,
            &RecorderError::HardwareDisconnected("capture device disconnected".into()),
        );
    }

    fn on_error(&self, code: i32) {
        self.controller.fail_session(
            self.generation,
            &RecorderError::HardwareDisconnected(format!("device reported error code {}", code)),
        );
    }
}

struct SessionCallbacks {
    controller: RecorderController,
    generation: u64,
}

impl SessionObserver for SessionCallbacks {
    fn on_configured(&self, session: Box<dyn CaptureSessionHandle>) {
        self.controller
            .handle_session_configured(self.generation, session);
    }

    fn on_configure_failed(&self) {
        self.controller.fail_session(
            self.generation,
            &RecorderError::ConfigurationFailed("capture session configuration failed".into()),
        );
    }
}
