use std::time::Duration;

use crate::animation::clock::{FixedStepClock, FrameClock, WallClock};
use crate::animation::ken_burns::KenBurns;
use crate::assets::decode::{PreparedImage, decode_image, prepare_for_canvas};
use crate::encode::codec::{DEFAULT_CODEC_PREFERENCE, VideoCodec};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{StudioError, StudioResult};
use crate::render::caption::CaptionStyle;

/// How frame timestamps are produced while recording.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    /// Advance exactly one frame period per frame, as fast as rendering allows.
    #[default]
    Offline,
    /// Pace frames against wall time; slow rendering skips poses.
    Realtime,
}

impl Pacing {
    /// Build the clock for this pacing mode.
    pub fn clock(self, fps: Fps) -> Box<dyn FrameClock + Send> {
        match self {
            Self::Offline => Box::new(FixedStepClock::new(fps)),
            Self::Realtime => Box::new(WallClock::new(fps)),
        }
    }
}

impl std::str::FromStr for Pacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "offline" => Ok(Self::Offline),
            "realtime" => Ok(Self::Realtime),
            other => Err(format!("unknown pacing '{other}' (expected offline|realtime)")),
        }
    }
}

/// Knobs for one motion synthesis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionSettings {
    /// Capture frame rate.
    pub fps: Fps,
    /// Animation length in milliseconds.
    pub duration_ms: u64,
    /// Longest canvas edge in pixels.
    pub max_edge: u32,
    /// Pan-and-zoom curve.
    pub ken_burns: KenBurns,
    /// Caption and shade layout.
    pub caption: CaptionStyle,
    /// How long the final frame is held before the recorder stops, in milliseconds.
    pub grace_ms: u64,
    /// Codecs to try, most preferred first.
    pub codecs: Vec<VideoCodec>,
    /// Clock used to drive frames.
    pub pacing: Pacing,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            fps: Fps { num: 30, den: 1 },
            duration_ms: 6000,
            max_edge: 768,
            ken_burns: KenBurns::default(),
            caption: CaptionStyle::default(),
            grace_ms: 120,
            codecs: DEFAULT_CODEC_PREFERENCE.to_vec(),
            pacing: Pacing::Offline,
        }
    }
}

impl MotionSettings {
    /// Validate every nested setting.
    pub fn validate(&self) -> StudioResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration_ms == 0 {
            return Err(StudioError::validation("duration_ms must be > 0"));
        }
        if self.max_edge < 2 {
            return Err(StudioError::validation("max_edge must be >= 2"));
        }
        if self.codecs.is_empty() {
            return Err(StudioError::validation("codec preference list is empty"));
        }
        self.ken_burns.validate()?;
        self.caption.validate()
    }

    /// Animation length.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Number of extra frames that hold the final pose before the recorder stops.
    pub fn tail_frames(&self) -> u64 {
        self.fps.secs_to_frames_ceil(Duration::from_millis(self.grace_ms).as_secs_f64())
    }
}

/// Everything one synthesis needs, fixed before the first frame.
#[derive(Clone, Debug)]
pub struct MotionJob {
    /// Output canvas, derived once from the source image.
    pub canvas: Canvas,
    /// Source image resampled to `canvas`.
    pub image: PreparedImage,
    /// Caption text as submitted.
    pub overlay_text: String,
    /// Timing and layout.
    pub settings: MotionSettings,
}

impl MotionJob {
    /// Decode `encoded` and size the canvas from it.
    #[tracing::instrument(skip(encoded, overlay_text, settings), fields(bytes = encoded.len()))]
    pub fn from_encoded(
        encoded: &[u8],
        overlay_text: &str,
        settings: MotionSettings,
    ) -> StudioResult<Self> {
        settings.validate()?;
        let rgba = decode_image(encoded)?;
        let (w, h) = rgba.dimensions();
        let canvas = Canvas::fit_within(w, h, settings.max_edge)?;
        tracing::debug!(
            src_width = w,
            src_height = h,
            width = canvas.width,
            height = canvas.height,
            "derived canvas"
        );
        Ok(Self {
            canvas,
            image: prepare_for_canvas(&rgba, canvas),
            overlay_text: overlay_text.to_owned(),
            settings,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/job.rs"]
mod tests;
