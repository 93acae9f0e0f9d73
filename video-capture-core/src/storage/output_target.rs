use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::error::RecorderError;

/// Destination folder plus a claimed unique output file for one session.
///
/// Owned by the encoder configuration step until handed to the encoder;
/// the file path becomes the completed session's result artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub folder: PathBuf,
    pub file_path: PathBuf,
}

impl OutputTarget {
    /// Ensure `<storage_root>/<folder_label>` exists and claim a unique
    /// file named `<label-no-spaces>_<yyyy-MM-dd_HH-mm-ss>.mp4` inside
    /// it, appending a random suffix on collision.
    ///
    /// Claiming creates the (empty) file, so a second session started in
    /// the same second cannot race onto the same name.
    pub fn create(storage_root: &Path, folder_label: &str) -> Result<Self, RecorderError> {
        let folder = storage_root.join(folder_label);
        if folder.exists() {
            log::info!("target folder exists at {}", folder.display());
        } else {
            fs::create_dir_all(&folder).map_err(|e| {
                RecorderError::StorageError(format!("failed to create target folder: {}", e))
            })?;
            log::info!("target folder created at {}", folder.display());
        }

        let base = folder_label.replace(' ', "");
        let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let file_path = claim_unique(&folder, &format!("{}_{}", base, stamp))?;

        Ok(Self { folder, file_path })
    }
}

fn claim_unique(folder: &Path, stem: &str) -> Result<PathBuf, RecorderError> {
    let plain = folder.join(format!("{}.mp4", stem));
    if try_claim(&plain)? {
        return Ok(plain);
    }

    // Collision within the same second: append a short random suffix.
    for _ in 0..4 {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let candidate = folder.join(format!("{}_{}.mp4", stem, &suffix[..8]));
        if try_claim(&candidate)? {
            return Ok(candidate);
        }
    }

    Err(RecorderError::StorageError(
        "could not claim a unique output file name".into(),
    ))
}

fn try_claim(path: &Path) -> Result<bool, RecorderError> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(RecorderError::StorageError(format!(
            "failed to create target file: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_folder_and_claims_file() {
        let root = tempfile::tempdir().unwrap();

        let target = OutputTarget::create(root.path(), "My Recordings").unwrap();

        assert!(target.folder.is_dir());
        assert!(target.file_path.exists());
        assert_eq!(target.folder, root.path().join("My Recordings"));

        let name = target.file_path.file_name().unwrap().to_string_lossy();
        // Spaces stripped from the file name prefix, not from the folder.
        assert!(name.starts_with("MyRecordings_"));
        assert!(name.ends_with(".mp4"));
    }

    #[test]
    fn collisions_get_a_unique_suffix() {
        let root = tempfile::tempdir().unwrap();

        // Two sessions in the same second must claim distinct files.
        let first = OutputTarget::create(root.path(), "clips").unwrap();
        let second = OutputTarget::create(root.path(), "clips").unwrap();

        assert_ne!(first.file_path, second.file_path);
        assert!(first.file_path.exists());
        assert!(second.file_path.exists());
    }

    #[test]
    fn unwritable_root_is_a_storage_error() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocked");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = OutputTarget::create(&blocker, "clips").unwrap_err();
        assert!(matches!(err, RecorderError::StorageError(_)));
    }
}
