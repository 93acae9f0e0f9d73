use crate::models::config::EncoderSettings;
use crate::models::error::RecorderError;

/// Opaque token for a prepared encoder's input surface.
///
/// Issued by [`VideoEncoder::prepare`] and consumed by the capture
/// session; the token is the only value a session may be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputSurface {
    pub id: u64,
}

/// Interface to the platform's hardware-accelerated encoder.
///
/// One encoder instance serves exactly one session: prepare → start →
/// stop, with `release` as the teardown path for aborted sessions.
pub trait VideoEncoder: Send {
    /// Open the output sink and configure the encoder. Returns the input
    /// surface the capture session must stream into. Fails with
    /// `ConfigurationFailed` if the sink cannot be opened; the failure is
    /// fatal to the session, never retried.
    fn prepare(&mut self, settings: &EncoderSettings) -> Result<InputSurface, RecorderError>;

    /// Begin encoding frames arriving on the input surface.
    fn start(&mut self) -> Result<(), RecorderError>;

    /// Stop encoding and flush the container. Synchronous: returns only
    /// once the output file is complete.
    fn stop(&mut self) -> Result<(), RecorderError>;

    /// Tear down without finalizing. Idempotent; any partially written
    /// file is left on disk but is not a valid artifact.
    fn release(&mut self);
}

/// Creates a fresh encoder for each recording session.
pub trait EncoderFactory: Send + Sync {
    fn create_encoder(&self) -> Box<dyn VideoEncoder>;
}
