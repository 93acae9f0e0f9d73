//! Derivation of per-session encoder parameters.

use std::path::PathBuf;

use crate::models::camera::{DeviceDescriptor, DisplayRotation};
use crate::models::config::{
    AudioCodec, ContainerFormat, EncoderSettings, VideoCodec, VIDEO_BIT_RATE, VIDEO_FRAME_RATE,
};
use crate::models::error::RecorderError;
use crate::session::device_selector;

/// Derive the full encoder configuration for a selected device.
///
/// Geometry follows the selection policy in [`device_selector`]; codec,
/// container, bitrate and frame rate are fixed.
pub fn derive_settings(
    descriptor: &DeviceDescriptor,
    rotation: DisplayRotation,
    output_path: PathBuf,
) -> Result<EncoderSettings, RecorderError> {
    let geometry = device_selector::choose_optimal_geometry(&descriptor.supported_geometries)
        .ok_or_else(|| {
            RecorderError::ConfigurationFailed("device reports no output geometries".into())
        })?;

    Ok(EncoderSettings {
        geometry,
        bit_rate: VIDEO_BIT_RATE,
        frame_rate: VIDEO_FRAME_RATE,
        orientation_hint: device_selector::sensor_to_device_rotation(
            descriptor.sensor_orientation,
            rotation,
        ),
        video_codec: VideoCodec::H264,
        audio_codec: AudioCodec::Aac,
        container: ContainerFormat::Mpeg4,
        output_path,
    })
}
