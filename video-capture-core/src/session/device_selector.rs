//! Device selection and geometry negotiation.

use crate::models::camera::{CaptureGeometry, DeviceDescriptor, DisplayRotation, LensFacing};
use crate::models::error::RecorderError;
use crate::traits::camera_provider::CameraProvider;

/// Select the first enumerated device matching `facing` that reports at
/// least one supported output geometry.
///
/// No retries: device topology is assumed stable for the process
/// lifetime. Enumeration failure or no match is fatal to the session.
pub fn select_device(
    provider: &dyn CameraProvider,
    facing: LensFacing,
) -> Result<DeviceDescriptor, RecorderError> {
    let devices = provider.enumerate_devices()?;
    devices
        .into_iter()
        .find(|d| d.facing == facing && !d.supported_geometries.is_empty())
        .ok_or(RecorderError::DeviceNotFound)
}

/// Choose the recording geometry from a device's supported sizes.
///
/// Keeps sizes on the exact 1920:1080 aspect line (`height == width *
/// 1080 / 1920`, integer division) that are at least 1920x1080, and picks
/// the smallest qualifying area. If nothing qualifies, falls back to the
/// first enumerated size — intentionally permissive, no quality floor.
pub fn choose_optimal_geometry(choices: &[CaptureGeometry]) -> Option<CaptureGeometry> {
    let qualifying = choices
        .iter()
        .filter(|g| g.height == g.width * 1080 / 1920 && g.width >= 1920 && g.height >= 1080)
        .min_by_key(|g| g.area());

    qualifying.or_else(|| choices.first()).copied()
}

/// Total rotation from sensor space to display space, in degrees.
///
/// Used as the container orientation hint so playback renders upright.
pub fn sensor_to_device_rotation(sensor_orientation: u32, rotation: DisplayRotation) -> u32 {
    (sensor_orientation + rotation.degrees() + 360) % 360
}
