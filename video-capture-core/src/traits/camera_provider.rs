use std::sync::Arc;

use crate::models::camera::{DeviceDescriptor, DisplayRotation};
use crate::models::error::RecorderError;
use crate::traits::video_encoder::InputSurface;

/// Terminal outcomes of one device-open attempt.
///
/// The platform delivers exactly one of `on_opened`, `on_disconnected`
/// or `on_error` per open attempt; disconnect and error may additionally
/// arrive later for a device that was already opened. Callbacks fire on
/// the backend's callback executor, never on the caller's thread, and
/// backends must not hold internal locks while invoking them.
pub trait DeviceObserver: Send + Sync {
    /// The device opened successfully. Ownership of the handle transfers
    /// to the observer.
    fn on_opened(&self, device: Box<dyn CameraHandle>);

    /// The device was disconnected (unplugged, claimed by another client).
    fn on_disconnected(&self);

    /// The device reported a hardware error.
    fn on_error(&self, code: i32);
}

/// Outcomes of capture-session configuration against an encoder surface.
pub trait SessionObserver: Send + Sync {
    /// The session is configured and ready for a repeating request.
    /// Ownership of the session handle transfers to the observer.
    fn on_configured(&self, session: Box<dyn CaptureSessionHandle>);

    /// The session could not be configured.
    fn on_configure_failed(&self);
}

/// Interface to the platform camera service.
///
/// Implemented by platform backends and by the simulated backend used in
/// tests. Device topology is assumed stable for the process lifetime, so
/// enumeration results may be cached by callers.
pub trait CameraProvider: Send + Sync {
    /// Whether the required capture permissions are currently granted.
    fn permissions_granted(&self) -> bool;

    /// Enumerate all physical capture devices.
    fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, RecorderError>;

    /// Current rotation of the default display.
    fn display_rotation(&self) -> DisplayRotation;

    /// Begin opening `device_id`. Completion is reported through the
    /// observer; an `Err` here means the open could not even be issued
    /// (permission revoked, device gone).
    fn open_device(
        &self,
        device_id: &str,
        observer: Arc<dyn DeviceObserver>,
    ) -> Result<(), RecorderError>;
}

/// An opened camera device.
pub trait CameraHandle: Send {
    /// Negotiate a capture session bound to the encoder's input surface.
    /// Completion is reported through the observer on the backend's
    /// callback executor, never synchronously from this call.
    fn create_capture_session(
        &mut self,
        surface: InputSurface,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<(), RecorderError>;

    /// Close the device. Idempotent.
    fn close(&mut self);
}

/// A configured capture session.
pub trait CaptureSessionHandle: Send {
    /// Issue the standing instruction to stream frames into the bound
    /// surface until the session is closed.
    fn set_repeating_request(&mut self) -> Result<(), RecorderError>;

    /// Stop streaming and release the session. Idempotent.
    fn close(&mut self);
}
