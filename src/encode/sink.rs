use crate::encode::codec::VideoCodec;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`Recorder`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Capture frame rate.
    pub fps: Fps,
}

/// Encoded output of a finished recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedVideo {
    /// Concatenated container bytes.
    pub bytes: Vec<u8>,
    /// Codec the bytes were encoded with.
    pub codec: VideoCodec,
}

/// Recorder contract for consuming rendered frames in timeline order.
///
/// `push_frame` is called with strictly increasing `FrameIndex` values between one `begin` and
/// one `finish`.
pub trait Recorder: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: RecorderConfig) -> StudioResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StudioResult<()>;
    /// Stop capture and return everything recorded.
    fn finish(&mut self) -> StudioResult<RecordedVideo>;
}

/// Source of recorders for one environment.
pub trait RecorderFactory: Send + Sync {
    /// Recorder type produced by [`RecorderFactory::open`].
    type Recorder: Recorder;

    /// Codecs this environment can encode. An empty list means recording is unavailable.
    fn supported_codecs(&self) -> StudioResult<Vec<VideoCodec>>;

    /// Create a recorder for `codec`. Callers pick `codec` from [`Self::supported_codecs`].
    fn open(&self, codec: VideoCodec) -> StudioResult<Self::Recorder>;
}

/// In-memory recorder for tests and debugging.
///
/// `finish` returns the raw premultiplied frames back to back, tagged with the configured codec.
#[derive(Debug)]
pub struct InMemoryRecorder {
    codec: VideoCodec,
    cfg: Option<RecorderConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemoryRecorder {
    /// Create an empty recorder that reports `codec`.
    pub fn new(codec: VideoCodec) -> Self {
        Self {
            codec,
            cfg: None,
            frames: Vec::new(),
        }
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<RecorderConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl Recorder for InMemoryRecorder {
    fn begin(&mut self, cfg: RecorderConfig) -> StudioResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> StudioResult<()> {
        if self.cfg.is_none() {
            return Err(StudioError::recording("recorder not started"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx <= *last
        {
            return Err(StudioError::recording("out-of-order frame index"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn finish(&mut self) -> StudioResult<RecordedVideo> {
        if self.cfg.take().is_none() {
            return Err(StudioError::recording("recorder not started"));
        }
        let bytes = self
            .frames
            .iter()
            .flat_map(|(_, f)| f.data.iter().copied())
            .collect();
        Ok(RecordedVideo {
            bytes,
            codec: self.codec,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
