//! Ownership and ordering of the device and capture-session handles.

use std::sync::Arc;

use crate::models::error::RecorderError;
use crate::traits::camera_provider::{CameraHandle, CaptureSessionHandle, SessionObserver};
use crate::traits::video_encoder::InputSurface;

/// Holds the opened device and configured capture session for one
/// recording attempt, and enforces the negotiation order: no repeating
/// capture request until the device is open AND the session is
/// configured.
///
/// All mutation happens under the controller's lock. Teardown is
/// idempotent: closing an empty coordinator is a no-op, never an error.
#[derive(Default)]
pub struct CaptureSessionCoordinator {
    device: Option<Box<dyn CameraHandle>>,
    session: Option<Box<dyn CaptureSessionHandle>>,
}

impl CaptureSessionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a freshly opened device.
    pub fn attach_device(&mut self, device: Box<dyn CameraHandle>) {
        debug_assert!(self.device.is_none(), "device attached twice");
        self.device = Some(device);
    }

    /// Bind the encoder's input surface into a capture session on the
    /// held device. Configuration completes through `observer`.
    pub fn bind_and_start(
        &mut self,
        surface: InputSurface,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<(), RecorderError> {
        let device = self.device.as_mut().ok_or_else(|| {
            RecorderError::ProtocolViolation("capture session requested before device open".into())
        })?;
        device.create_capture_session(surface, observer)
    }

    /// Store the configured session and issue the repeating capture
    /// request. Rejected if the device is no longer held (torn down
    /// while configuration was in flight).
    pub fn activate(
        &mut self,
        mut session: Box<dyn CaptureSessionHandle>,
    ) -> Result<(), RecorderError> {
        if self.device.is_none() {
            session.close();
            return Err(RecorderError::ProtocolViolation(
                "repeating request requires an open device".into(),
            ));
        }
        session.set_repeating_request()?;
        self.session = Some(session);
        Ok(())
    }

    /// Close the session, then the device. Safe to call any number of
    /// times and from any exit path.
    pub fn stop_and_close(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
        }
        if let Some(mut device) = self.device.take() {
            device.close();
        }
    }

    pub fn holds_device(&self) -> bool {
        self.device.is_some()
    }

    pub fn holds_session(&self) -> bool {
        self.session.is_some()
    }
}
