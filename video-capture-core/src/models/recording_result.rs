use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::camera::{CaptureGeometry, LensFacing};
use super::error::RecorderError;

/// Result returned when a recording session completes successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingArtifact {
    pub file_path: PathBuf,
    pub duration_secs: f64,
    pub metadata: RecordingMetadata,
}

/// Metadata stored alongside a completed recording.
///
/// Persisted as a JSON sidecar next to the recording file, with the
/// `.mp4` extension swapped for `.metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub id: String,
    pub file_path: String,
    pub duration_secs: f64,
    pub device_id: String,
    pub geometry: CaptureGeometry,
    pub orientation_hint: u32,
    pub facing: LensFacing,
    pub folder_label: String,
    pub created_at: String,
}

impl RecordingMetadata {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_path: &str,
        duration_secs: f64,
        device_id: &str,
        geometry: CaptureGeometry,
        orientation_hint: u32,
        facing: LensFacing,
        folder_label: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path: file_path.to_string(),
            duration_secs,
            device_id: device_id.to_string(),
            geometry,
            orientation_hint,
            facing,
            folder_label: folder_label.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn sidecar_path(recording: &Path) -> PathBuf {
        recording.with_extension("metadata.json")
    }

    /// Persist this metadata as a sidecar next to `recording`.
    pub fn save(&self, recording: &Path) -> Result<(), RecorderError> {
        let body = serde_json::to_vec_pretty(self)
            .map_err(|e| RecorderError::StorageError(format!("metadata encoding: {}", e)))?;
        fs::write(Self::sidecar_path(recording), body)
            .map_err(|e| RecorderError::StorageError(format!("metadata sidecar write: {}", e)))
    }

    /// Load the metadata sidecar written for `recording`.
    pub fn load(recording: &Path) -> Result<Self, RecorderError> {
        let body = fs::read(Self::sidecar_path(recording))
            .map_err(|e| RecorderError::StorageError(format!("metadata sidecar read: {}", e)))?;
        serde_json::from_slice(&body)
            .map_err(|e| RecorderError::StorageError(format!("metadata sidecar parse: {}", e)))
    }
}
