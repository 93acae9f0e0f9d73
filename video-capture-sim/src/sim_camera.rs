//! Simulated camera service.
//!
//! Callbacks are delivered on spawned threads, standing in for the
//! platform's serialized callback executor, so the controller sees the
//! same asynchrony as against real hardware. Observers are never invoked
//! while the simulator's own lock is held.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use video_capture_core::{
    CameraHandle, CameraProvider, CaptureGeometry, CaptureSessionHandle, DeviceDescriptor,
    DeviceObserver, DisplayRotation, InputSurface, LensFacing, RecorderError, SessionObserver,
};

/// Failure injection knobs for the simulated camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimCameraFaults {
    /// Report capture permissions as revoked.
    pub deny_permission: bool,
    /// Fail the open call synchronously (camera claimed elsewhere).
    pub fail_open: bool,
    /// Deliver `on_configure_failed` instead of a configured session.
    pub fail_configure: bool,
    /// Hold the device-opened callback back for this long.
    pub open_delay: Option<Duration>,
}

#[derive(Default)]
struct SimCameraShared {
    faults: SimCameraFaults,
    open_handles: usize,
    live_observer: Option<Arc<dyn DeviceObserver>>,
    bound_surface: Option<InputSurface>,
    repeating_active: bool,
}

/// In-process stand-in for the platform camera service.
pub struct SimCameraProvider {
    devices: Vec<DeviceDescriptor>,
    rotation: DisplayRotation,
    shared: Arc<Mutex<SimCameraShared>>,
}

impl SimCameraProvider {
    pub fn new(devices: Vec<DeviceDescriptor>, rotation: DisplayRotation) -> Self {
        Self {
            devices,
            rotation,
            shared: Arc::new(Mutex::new(SimCameraShared::default())),
        }
    }

    /// A single rear camera with a typical geometry ladder.
    pub fn back_camera() -> Self {
        Self::new(
            vec![DeviceDescriptor {
                id: "0".into(),
                facing: LensFacing::Back,
                sensor_orientation: 90,
                supported_geometries: vec![
                    CaptureGeometry::new(3840, 2160),
                    CaptureGeometry::new(1920, 1080),
                    CaptureGeometry::new(1280, 720),
                ],
            }],
            DisplayRotation::Deg0,
        )
    }

    /// Rear plus front camera, the front limited to 720p.
    pub fn front_and_back() -> Self {
        let mut provider = Self::back_camera();
        provider.devices.push(DeviceDescriptor {
            id: "1".into(),
            facing: LensFacing::Front,
            sensor_orientation: 270,
            supported_geometries: vec![CaptureGeometry::new(1280, 720)],
        });
        provider
    }

    pub fn set_faults(&self, faults: SimCameraFaults) {
        self.shared.lock().faults = faults;
    }

    /// Number of device handles currently open. Zero whenever the
    /// controller is idle, if teardown is leak-free.
    pub fn open_handle_count(&self) -> usize {
        self.shared.lock().open_handles
    }

    /// The encoder surface the last capture session was bound to.
    pub fn bound_surface(&self) -> Option<InputSurface> {
        self.shared.lock().bound_surface
    }

    /// Whether a repeating capture request is currently streaming
    /// frames. True only between session activation and close.
    pub fn repeating_active(&self) -> bool {
        self.shared.lock().repeating_active
    }

    /// Simulate the device being lost (unplugged, claimed by a
    /// higher-priority client). Delivered on the caller's thread.
    pub fn trigger_disconnect(&self) {
        let observer = self.shared.lock().live_observer.clone();
        if let Some(observer) = observer {
            observer.on_disconnected();
        }
    }

    /// Simulate a hardware fault report for the open device.
    pub fn trigger_error(&self, code: i32) {
        let observer = self.shared.lock().live_observer.clone();
        if let Some(observer) = observer {
            observer.on_error(code);
        }
    }
}

impl CameraProvider for SimCameraProvider {
    fn permissions_granted(&self) -> bool {
        !self.shared.lock().faults.deny_permission
    }

    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, RecorderError> {
        Ok(self.devices.clone())
    }

    fn display_rotation(&self) -> DisplayRotation {
        self.rotation
    }

    fn open_device(
        &self,
        device_id: &str,
        observer: Arc<dyn DeviceObserver>,
    ) -> Result<(), RecorderError> {
        let (faults, known) = {
            let mut shared = self.shared.lock();
            let known = self.devices.iter().any(|d| d.id == device_id);
            if known && !shared.faults.fail_open {
                shared.live_observer = Some(observer.clone());
            }
            (shared.faults, known)
        };

        if faults.fail_open {
            return Err(RecorderError::HardwareDisconnected(
                "camera in use by another client".into(),
            ));
        }
        if !known {
            return Err(RecorderError::DeviceNotFound);
        }

        let shared = Arc::clone(&self.shared);
        let device_id = device_id.to_string();
        thread::spawn(move || {
            if let Some(delay) = faults.open_delay {
                thread::sleep(delay);
            }
            shared.lock().open_handles += 1;
            log::info!("sim camera {} opened", device_id);
            observer.on_opened(Box::new(SimCameraHandle {
                device_id,
                shared,
                closed: false,
            }));
        });
        Ok(())
    }
}

struct SimCameraHandle {
    device_id: String,
    shared: Arc<Mutex<SimCameraShared>>,
    closed: bool,
}

impl CameraHandle for SimCameraHandle {
    fn create_capture_session(
        &mut self,
        surface: InputSurface,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<(), RecorderError> {
        let fail = self.shared.lock().faults.fail_configure;
        let shared = Arc::clone(&self.shared);
        thread::spawn(move || {
            if fail {
                observer.on_configure_failed();
            } else {
                shared.lock().bound_surface = Some(surface);
                observer.on_configured(Box::new(SimCaptureSession { shared }));
            }
        });
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.shared.lock().open_handles -= 1;
            log::info!("sim camera {} closed", self.device_id);
        }
    }
}

struct SimCaptureSession {
    shared: Arc<Mutex<SimCameraShared>>,
}

impl CaptureSessionHandle for SimCaptureSession {
    fn set_repeating_request(&mut self) -> Result<(), RecorderError> {
        self.shared.lock().repeating_active = true;
        Ok(())
    }

    fn close(&mut self) {
        self.shared.lock().repeating_active = false;
    }
}
