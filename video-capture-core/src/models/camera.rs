use serde::{Deserialize, Serialize};

/// Physical orientation of a capture device relative to the device body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensFacing {
    Front,
    Back,
}

/// Rotation of the display relative to its natural orientation.
///
/// Maps the platform's rotation enum {0, 90, 180, 270} identity-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayRotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl DisplayRotation {
    pub fn degrees(&self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl Default for DisplayRotation {
    fn default() -> Self {
        Self::Deg0
    }
}

/// A (width, height) output size supported by a capture device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureGeometry {
    pub width: u32,
    pub height: u32,
}

impl CaptureGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Immutable result of device enumeration.
///
/// Produced by the camera backend, read-only, not persisted beyond
/// selection of the active device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: String,
    pub facing: LensFacing,
    /// Clockwise angle the sensor image must be rotated to appear upright
    /// on the display in its natural orientation, in degrees.
    pub sensor_orientation: u32,
    /// Output sizes the device can stream to an encoder surface.
    pub supported_geometries: Vec<CaptureGeometry>,
}
