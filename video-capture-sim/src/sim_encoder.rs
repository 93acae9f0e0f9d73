//! Simulated hardware encoder.
//!
//! Writes a recognizable MPEG-4 file skeleton instead of real H.264/AAC
//! payload, and enforces the prepare → start → stop call protocol the
//! real encoder contract requires.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use video_capture_core::{
    EncoderFactory, EncoderSettings, InputSurface, RecorderError, VideoEncoder,
};

/// `ftyp` box declaring an mp42 brand.
const FTYP_BOX: &[u8] = b"\x00\x00\x00\x14ftypmp42\x00\x00\x00\x00mp42";

/// Empty `mdat` box written on flush.
const MDAT_BOX: &[u8] = b"\x00\x00\x00\x08mdat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Prepared,
    Started,
    Finished,
}

/// One-shot simulated encoder: serves a single session then is done.
pub struct SimEncoder {
    phase: Phase,
    sink: Option<File>,
    surface: InputSurface,
}

impl SimEncoder {
    fn new(surface: InputSurface) -> Self {
        Self {
            phase: Phase::Idle,
            sink: None,
            surface,
        }
    }
}

impl VideoEncoder for SimEncoder {
    fn prepare(&mut self, settings: &EncoderSettings) -> Result<InputSurface, RecorderError> {
        if self.phase != Phase::Idle {
            return Err(RecorderError::ProtocolViolation(
                "encoder prepared twice".into(),
            ));
        }

        let mut sink = OpenOptions::new()
            .write(true)
            .open(&settings.output_path)
            .map_err(|e| {
                RecorderError::ConfigurationFailed(format!("failed to open output sink: {}", e))
            })?;
        sink.write_all(FTYP_BOX).map_err(|e| {
            RecorderError::ConfigurationFailed(format!("failed to write container header: {}", e))
        })?;

        log::info!(
            "sim encoder prepared: {}x{} @ {} fps, {} bps, hint {}",
            settings.geometry.width,
            settings.geometry.height,
            settings.frame_rate,
            settings.bit_rate,
            settings.orientation_hint
        );
        self.sink = Some(sink);
        self.phase = Phase::Prepared;
        Ok(self.surface)
    }

    fn start(&mut self) -> Result<(), RecorderError> {
        if self.phase != Phase::Prepared {
            return Err(RecorderError::ProtocolViolation(
                "encoder started before prepare".into(),
            ));
        }
        self.phase = Phase::Started;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        if self.phase != Phase::Started {
            return Err(RecorderError::ProtocolViolation(
                "encoder stopped without being started".into(),
            ));
        }

        // Synchronous flush: the file is complete when this returns.
        let result = match self.sink.as_mut() {
            Some(sink) => sink
                .write_all(MDAT_BOX)
                .and_then(|()| sink.flush())
                .map_err(|e| RecorderError::StorageError(format!("flush failed: {}", e))),
            None => Err(RecorderError::ProtocolViolation(
                "encoder has no output sink".into(),
            )),
        };

        self.sink = None;
        self.phase = Phase::Finished;
        result
    }

    fn release(&mut self) {
        // Idempotent teardown: drop the sink without finalizing. Any
        // partial file stays on disk but is not a valid artifact.
        self.sink = None;
        self.phase = Phase::Finished;
    }
}

/// Hands out fresh encoders with distinct input-surface tokens.
#[derive(Default)]
pub struct SimEncoderFactory {
    next_surface: AtomicU64,
}

impl SimEncoderFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EncoderFactory for SimEncoderFactory {
    fn create_encoder(&self) -> Box<dyn VideoEncoder> {
        let id = self.next_surface.fetch_add(1, Ordering::SeqCst) + 1;
        Box::new(SimEncoder::new(InputSurface { id }))
    }
}
