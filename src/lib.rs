//! Stillmotion turns two short text prompts into a generated still image and a short Ken Burns
//! clip of that image with a caption.
//!
//! The pipeline:
//!
//! - [`PromptService`] enhances the prompts and builds the image-generation URL
//! - [`MotionSynthesizer`] fetches the image, renders eased pan-and-zoom frames on the CPU and
//!   records them through a [`Recorder`] (the system `ffmpeg` in production)
//! - [`Studio`] runs submissions per session, keeping one live [`VideoArtifact`] each
//!
//! [`server::create_router`] exposes the studio over HTTP.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod artifact;
pub(crate) mod assets;
pub(crate) mod config;
pub mod encode;
pub(crate) mod motion;
pub(crate) mod prompt;
pub(crate) mod render;
pub mod server;
pub(crate) mod studio;
pub(crate) mod telemetry;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, MIN_CANVAS_EDGE, Rect, Vec2};
pub use crate::foundation::error::{StudioError, StudioResult};

pub use crate::animation::clock::{FixedStepClock, FrameClock, WallClock};
pub use crate::animation::ease::Ease;
pub use crate::animation::ken_burns::{CameraPose, KenBurns};
pub use crate::artifact::{
    DEFAULT_URL_PREFIX, ObjectUrlRegistry, StoredVideo, VIDEO_FILE_STEM, VideoArtifact,
    video_filename,
};
pub use crate::assets::decode::{PreparedImage, decode_image, prepare_for_canvas};
pub use crate::assets::fetch::{ImageFetcher, ImageLoader};
pub use crate::assets::font::CaptionFont;
pub use crate::config::{StudioConfig, parse_codecs, parse_fps};
pub use crate::encode::codec::{DEFAULT_CODEC_PREFERENCE, VideoCodec, select_codec};
pub use crate::encode::ffmpeg::{FfmpegRecorder, FfmpegRecorderFactory};
pub use crate::encode::sink::{
    InMemoryRecorder, RecordedVideo, Recorder, RecorderConfig, RecorderFactory,
};
pub use crate::motion::job::{MotionJob, MotionSettings, Pacing};
pub use crate::motion::synth::{
    MotionSynthesizer, SystemSynthesizer, choose_codec, record_job, render_still,
    synthesize_encoded,
};
pub use crate::prompt::enhance::{DESCRIPTOR_COUNT, PromptKind, enhance, normalize_whitespace};
pub use crate::prompt::image_url::{DEFAULT_IMAGE_ENDPOINT, ImageEndpoint, SEED_RANGE};
pub use crate::prompt::service::{GenerationResult, PromptService};
pub use crate::render::caption::{
    CaptionLine, CaptionPlan, CaptionStyle, MAX_CAPTION_LINES, TextMeasure, plan_caption,
    wrap_words,
};
pub use crate::render::cpu::FrameRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::studio::{Completed, Studio, SubmitError, Submission, SystemStudio};
pub use crate::telemetry::init_tracing;
