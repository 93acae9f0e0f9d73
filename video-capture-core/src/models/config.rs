use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::camera::{CaptureGeometry, LensFacing};

/// Target video bitrate in bits per second.
pub const VIDEO_BIT_RATE: u32 = 10_000_000;

/// Target video frame rate in frames per second.
pub const VIDEO_FRAME_RATE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    H264,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Aac,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    Mpeg4,
}

/// Options for one recording attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOptions {
    /// Which camera to record from.
    pub facing: LensFacing,

    /// Sub-folder under `storage_root` where the recording is written.
    /// Also used (with spaces stripped) as the output file name prefix.
    pub folder_label: String,

    /// Title for the host's ongoing-recording notification.
    pub notification_title: String,

    /// Body text for the host's ongoing-recording notification.
    pub notification_text: String,

    /// Root of the shared video storage area.
    pub storage_root: PathBuf,
}

impl RecordingOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.folder_label.trim().is_empty() {
            return Err("folder label must not be empty".into());
        }
        Ok(())
    }
}

impl Default for RecordingOptions {
    fn default() -> Self {
        Self {
            facing: LensFacing::Back,
            folder_label: "BackgroundVideoRecorder".into(),
            notification_title: "Background Video Recorder".into(),
            notification_text: "Video recording is in progress".into(),
            storage_root: PathBuf::from("."),
        }
    }
}

/// Fully derived encoder parameters for one session.
///
/// Codec, container, bitrate and frame rate are fixed; geometry and
/// orientation hint are negotiated per device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSettings {
    pub geometry: CaptureGeometry,
    pub bit_rate: u32,
    pub frame_rate: u32,
    /// Degrees of rotation metadata embedded in the container so playback
    /// renders the video upright.
    pub orientation_hint: u32,
    pub video_codec: VideoCodec,
    pub audio_codec: AudioCodec,
    pub container: ContainerFormat,
    pub output_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_folder_label_is_rejected() {
        let options = RecordingOptions {
            folder_label: "   ".into(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
        assert!(RecordingOptions::default().validate().is_ok());
    }
}
