//! # video-capture-core
//!
//! Platform-agnostic background video recording core library.
//!
//! Provides the recording session state machine: camera device
//! selection, encoder configuration, capture-session negotiation, and
//! the start/stop/error transition protocol. Platform backends (and the
//! simulated backend used in tests) implement the `CameraProvider` and
//! `VideoEncoder` traits and plug into the generic `RecorderController`.
//!
//! ## Architecture
//!
//! ```text
//! video-capture-core (this crate)
//! ├── traits/    ← CameraProvider, VideoEncoder, RecorderDelegate
//! ├── models/    ← RecorderError, RecorderState, RecordingOptions, DeviceDescriptor, etc.
//! ├── session/   ← RecorderController, CaptureSessionCoordinator, selection policies
//! └── storage/   ← OutputTarget output-file claiming
//! ```
//!
//! ## Guarantees
//!
//! - At most one session is in flight; concurrent starts are rejected
//!   synchronously.
//! - The repeating capture request is never issued before the device is
//!   open and the session is configured.
//! - Every exit path (success, denial, hardware failure) releases the
//!   device and session handles idempotently.

pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::camera::{CaptureGeometry, DeviceDescriptor, DisplayRotation, LensFacing};
pub use models::config::{EncoderSettings, RecordingOptions};
pub use models::error::RecorderError;
pub use models::events::LifecycleEvent;
pub use models::recording_result::{RecordingArtifact, RecordingMetadata};
pub use models::state::RecorderState;
pub use session::controller::{ControllerDiagnostics, RecorderController};
pub use session::coordinator::CaptureSessionCoordinator;
pub use storage::output_target::OutputTarget;
pub use traits::camera_provider::{
    CameraHandle, CameraProvider, CaptureSessionHandle, DeviceObserver, SessionObserver,
};
pub use traits::recorder_delegate::RecorderDelegate;
pub use traits::video_encoder::{EncoderFactory, InputSurface, VideoEncoder};
