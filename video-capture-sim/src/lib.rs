//! # video-capture-sim
//!
//! Simulated camera and encoder backend for `video-capture-core`.
//!
//! Implements the `CameraProvider` and `VideoEncoder` seams against an
//! in-process camera service that delivers its callbacks on spawned
//! threads, so the controller is exercised under the same asynchrony it
//! faces on real hardware. Fault injection covers the interesting
//! failure modes: permission denial, open failure, configure failure,
//! delayed callbacks, and mid-recording disconnects.

pub mod sim_camera;
pub mod sim_encoder;

pub use sim_camera::{SimCameraFaults, SimCameraProvider};
pub use sim_encoder::{SimEncoder, SimEncoderFactory};

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use video_capture_core::{
        InputSurface, LifecycleEvent, RecorderController, RecorderDelegate, RecorderError,
        RecorderState, RecordingArtifact, RecordingMetadata, RecordingOptions,
    };

    use crate::{SimCameraFaults, SimCameraProvider, SimEncoderFactory};

    #[derive(Default)]
    struct CollectingDelegate {
        events: Mutex<Vec<LifecycleEvent>>,
        artifacts: Mutex<Vec<RecordingArtifact>>,
    }

    impl CollectingDelegate {
        fn codes(&self) -> Vec<RecorderState> {
            self.events.lock().iter().map(|e| e.code).collect()
        }
    }

    impl RecorderDelegate for CollectingDelegate {
        fn on_lifecycle_event(&self, event: &LifecycleEvent) {
            self.events.lock().push(event.clone());
        }

        fn on_recording_finished(&self, artifact: &RecordingArtifact) {
            self.artifacts.lock().push(artifact.clone());
        }
    }

    struct Fixture {
        camera: Arc<SimCameraProvider>,
        delegate: Arc<CollectingDelegate>,
        controller: RecorderController,
        _root: tempfile::TempDir,
        options: RecordingOptions,
    }

    fn fixture() -> Fixture {
        fixture_with_camera(SimCameraProvider::back_camera())
    }

    fn fixture_with_camera(camera: SimCameraProvider) -> Fixture {
        let camera = Arc::new(camera);
        let controller =
            RecorderController::new(camera.clone(), Arc::new(SimEncoderFactory::new()));
        let delegate = Arc::new(CollectingDelegate::default());
        controller.set_delegate(delegate.clone());

        let root = tempfile::tempdir().unwrap();
        let options = RecordingOptions {
            storage_root: root.path().to_path_buf(),
            folder_label: "Dash Cam".into(),
            ..Default::default()
        };

        Fixture {
            camera,
            delegate,
            controller,
            _root: root,
            options,
        }
    }

    /// Poll until the controller reports the wanted status code.
    fn wait_for_status(controller: &RecorderController, wanted: i32) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while controller.status() != wanted {
            assert!(
                Instant::now() < deadline,
                "timed out waiting for status {}, still {}",
                wanted,
                controller.status()
            );
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn wait_for<F: Fn() -> bool>(what: &str, condition: F) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out waiting for {}", what);
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn full_cycle_produces_playable_skeleton_and_sidecar() {
        let f = fixture();

        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);
        assert!(f.camera.repeating_active());

        let path = f.controller.stop().unwrap();
        assert_eq!(f.controller.status(), 2);
        assert!(!f.camera.repeating_active());

        assert!(path.extension().is_some_and(|e| e == "mp4"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[4..8], b"ftyp");

        let sidecar = RecordingMetadata::load(&path).unwrap();
        assert_eq!(sidecar.device_id, "0");
        assert_eq!(sidecar.orientation_hint, 90);

        assert_eq!(
            f.delegate.codes(),
            vec![
                RecorderState::Initializing,
                RecorderState::Recording,
                RecorderState::Stopped,
            ]
        );
        assert_eq!(f.delegate.artifacts.lock().len(), 1);
        assert_eq!(f.camera.open_handle_count(), 0);
    }

    #[test]
    fn front_camera_session_uses_the_front_device() {
        let f = fixture_with_camera(SimCameraProvider::front_and_back());
        let options = RecordingOptions {
            facing: video_capture_core::LensFacing::Front,
            ..f.options.clone()
        };

        f.controller.start(options).unwrap();
        wait_for_status(&f.controller, 1);
        let path = f.controller.stop().unwrap();

        let meta = RecordingMetadata::load(&path).unwrap();
        assert_eq!(meta.device_id, "1");
        // Front camera tops out at 720p, so the permissive fallback keeps
        // the first enumerated geometry.
        assert_eq!(meta.geometry, video_capture_core::CaptureGeometry::new(1280, 720));
    }

    #[test]
    fn stop_during_delayed_open_is_rejected_then_session_completes() {
        let f = fixture();
        f.camera.set_faults(SimCameraFaults {
            open_delay: Some(Duration::from_millis(50)),
            ..Default::default()
        });

        f.controller.start(f.options.clone()).unwrap();
        assert_eq!(f.controller.stop(), Err(RecorderError::StillInitializing));

        // The rejected stop left initialization undisturbed.
        wait_for_status(&f.controller, 1);
        f.controller.stop().unwrap();
        assert_eq!(f.camera.open_handle_count(), 0);
    }

    #[test]
    fn permission_denial_fails_before_touching_the_device() {
        let f = fixture();
        f.camera.set_faults(SimCameraFaults {
            deny_permission: true,
            ..Default::default()
        });

        assert_eq!(
            f.controller.start(f.options.clone()),
            Err(RecorderError::PermissionDenied)
        );
        assert_eq!(f.controller.status(), 2);
        assert_eq!(
            f.delegate.codes(),
            vec![RecorderState::Initializing, RecorderState::Exception]
        );
        assert_eq!(f.camera.open_handle_count(), 0);
    }

    #[test]
    fn configure_failure_resets_without_leaking_handles() {
        let f = fixture();
        f.camera.set_faults(SimCameraFaults {
            fail_configure: true,
            ..Default::default()
        });

        f.controller.start(f.options.clone()).unwrap();
        wait_for("exception reset", || {
            f.delegate.codes().len() == 2 && f.controller.status() == 2
        });

        assert_eq!(
            f.delegate.codes(),
            vec![RecorderState::Initializing, RecorderState::Exception]
        );
        assert_eq!(f.camera.open_handle_count(), 0);

        // A fresh start succeeds once the fault clears.
        f.camera.set_faults(SimCameraFaults::default());
        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);
        f.controller.stop().unwrap();
    }

    #[test]
    fn disconnect_mid_recording_tears_down_and_reports_exception() {
        let f = fixture();
        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);

        f.camera.trigger_disconnect();
        wait_for_status(&f.controller, 2);

        assert_eq!(
            f.delegate.codes(),
            vec![
                RecorderState::Initializing,
                RecorderState::Recording,
                RecorderState::Exception,
            ]
        );
        assert_eq!(f.camera.open_handle_count(), 0);
        assert_eq!(f.controller.stop(), Err(RecorderError::NotRecording));
    }

    #[test]
    fn hardware_error_report_is_treated_as_disconnect() {
        let f = fixture();
        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);

        f.camera.trigger_error(3);
        wait_for_status(&f.controller, 2);

        let events = f.delegate.events.lock();
        let last = events.last().unwrap();
        assert_eq!(last.code, RecorderState::Exception);
        assert!(last.message.contains("error code 3"));
    }

    #[test]
    fn second_start_is_rejected_while_a_session_is_live() {
        let f = fixture();
        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);

        assert_eq!(
            f.controller.start(f.options.clone()),
            Err(RecorderError::AlreadyRecording)
        );
        assert_eq!(f.controller.status(), 1);
        f.controller.stop().unwrap();
    }

    #[test]
    fn encoder_surface_is_the_one_bound_to_the_session() {
        let f = fixture();
        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);

        assert_eq!(f.camera.bound_surface(), Some(InputSurface { id: 1 }));
        f.controller.stop().unwrap();
    }

    #[test]
    fn consecutive_recordings_get_distinct_files() {
        let f = fixture();

        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);
        let first = f.controller.stop().unwrap();

        f.controller.start(f.options.clone()).unwrap();
        wait_for_status(&f.controller, 1);
        let second = f.controller.stop().unwrap();

        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
        assert_eq!(f.camera.open_handle_count(), 0);
    }
}
