use std::sync::Arc;

use anyhow::anyhow;

use crate::animation::clock::FrameClock;
use crate::artifact::{ObjectUrlRegistry, VideoArtifact};
use crate::assets::fetch::{ImageFetcher, ImageLoader};
use crate::assets::font::CaptionFont;
use crate::config::StudioConfig;
use crate::encode::codec::{VideoCodec, select_codec};
use crate::encode::ffmpeg::FfmpegRecorderFactory;
use crate::encode::sink::{RecordedVideo, Recorder, RecorderConfig, RecorderFactory};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{StudioError, StudioResult};
use crate::motion::job::{MotionJob, MotionSettings};
use crate::render::cpu::FrameRenderer;
use crate::render::frame::FrameRGBA;

/// Pick the recording codec for `factory`, failing before any recorder exists.
pub fn choose_codec<F: RecorderFactory + ?Sized>(
    factory: &F,
    preference: &[VideoCodec],
) -> StudioResult<VideoCodec> {
    let supported = factory.supported_codecs()?;
    select_codec(preference, &supported)
}

/// Render `job` into `recorder`, one frame per clock tick.
///
/// The last rendered frame is always at `t = 1`; it is then repeated for the grace period before
/// the recorder is finished.
#[tracing::instrument(
    skip_all,
    fields(width = job.canvas.width, height = job.canvas.height, duration_ms = job.settings.duration_ms)
)]
pub fn record_job<C, R>(
    job: &MotionJob,
    font: Option<&CaptionFont>,
    clock: &mut C,
    recorder: &mut R,
) -> StudioResult<RecordedVideo>
where
    C: FrameClock + ?Sized,
    R: Recorder + ?Sized,
{
    let settings = &job.settings;
    let mut renderer = FrameRenderer::new(
        job.canvas,
        &job.image,
        &job.overlay_text,
        font,
        &settings.caption,
    )?;

    recorder.begin(RecorderConfig {
        width: job.canvas.width,
        height: job.canvas.height,
        fps: settings.fps,
    })?;

    let duration = settings.duration();
    let total = duration.as_secs_f64();
    let mut idx = 0u64;
    let last = loop {
        let elapsed = clock.next_frame();
        let t = (elapsed.as_secs_f64() / total).min(1.0);
        let frame = renderer.render(&settings.ken_burns.pose(t, job.canvas))?;
        recorder.push_frame(FrameIndex(idx), &frame)?;
        idx += 1;
        if elapsed >= duration {
            break frame;
        }
    };

    let tail = settings.tail_frames();
    for _ in 0..tail {
        recorder.push_frame(FrameIndex(idx), &last)?;
        idx += 1;
    }

    let video = recorder.finish()?;
    tracing::info!(
        frames = idx,
        tail,
        codec = %video.codec,
        bytes = video.bytes.len(),
        "motion recorded"
    );
    Ok(video)
}

/// Render the single frame at normalized time `t`.
pub fn render_still(job: &MotionJob, font: Option<&CaptionFont>, t: f64) -> StudioResult<FrameRGBA> {
    let mut renderer = FrameRenderer::new(
        job.canvas,
        &job.image,
        &job.overlay_text,
        font,
        &job.settings.caption,
    )?;
    renderer.render(&job.settings.ken_burns.pose(t, job.canvas))
}

/// Blocking synthesis from encoded image bytes.
///
/// Codec support is checked first; when nothing is supported no image is decoded and no recorder
/// is opened. The recorder lives only inside this call and is dropped on every exit path.
pub fn synthesize_encoded<F: RecorderFactory + ?Sized>(
    encoded: &[u8],
    overlay_text: &str,
    settings: &MotionSettings,
    font: Option<&CaptionFont>,
    factory: &F,
) -> StudioResult<RecordedVideo> {
    let codec = choose_codec(factory, &settings.codecs)?;
    let job = MotionJob::from_encoded(encoded, overlay_text, settings.clone())?;
    let mut clock = settings.pacing.clock(settings.fps);
    let mut recorder = factory.open(codec)?;
    record_job(&job, font, clock.as_mut(), &mut recorder)
}

/// Turns an image URL and a caption into a registered [`VideoArtifact`].
pub struct MotionSynthesizer<F, R> {
    fetcher: Arc<F>,
    recorders: Arc<R>,
    registry: Arc<ObjectUrlRegistry>,
    settings: MotionSettings,
    font: Option<CaptionFont>,
}

impl<F, R> MotionSynthesizer<F, R>
where
    F: ImageFetcher,
    R: RecorderFactory + 'static,
{
    /// Assemble a synthesizer. `font` of `None` renders videos without captions.
    pub fn new(
        fetcher: Arc<F>,
        recorders: Arc<R>,
        registry: Arc<ObjectUrlRegistry>,
        settings: MotionSettings,
        font: Option<CaptionFont>,
    ) -> StudioResult<Self> {
        settings.validate()?;
        Ok(Self {
            fetcher,
            recorders,
            registry,
            settings,
            font,
        })
    }

    /// Settings applied to every job.
    pub fn settings(&self) -> &MotionSettings {
        &self.settings
    }

    /// Registry that owns the produced object URLs.
    pub fn registry(&self) -> &Arc<ObjectUrlRegistry> {
        &self.registry
    }

    /// Fetch `image_url`, animate it under `overlay_text`, and register the recording.
    ///
    /// Nothing is registered unless the recorder finished successfully.
    #[tracing::instrument(skip(self, overlay_text), fields(caption_len = overlay_text.len()))]
    pub async fn synthesize(&self, image_url: &str, overlay_text: &str) -> StudioResult<VideoArtifact> {
        let encoded = self.fetcher.fetch(image_url).await?;

        let recorders = Arc::clone(&self.recorders);
        let settings = self.settings.clone();
        let font = self.font.clone();
        let overlay = overlay_text.to_owned();
        let recorded = tokio::task::spawn_blocking(move || {
            synthesize_encoded(&encoded, &overlay, &settings, font.as_ref(), recorders.as_ref())
        })
        .await
        .map_err(|e| StudioError::from(anyhow!("synthesis task failed: {e}")))??;

        Ok(self.registry.create(recorded))
    }
}

/// Synthesizer that fetches over HTTP (or from disk) and records with the system `ffmpeg`.
pub type SystemSynthesizer = MotionSynthesizer<ImageLoader, FfmpegRecorderFactory>;

impl MotionSynthesizer<ImageLoader, FfmpegRecorderFactory> {
    /// Wire a synthesizer from `config`. A missing caption font is not an error.
    pub fn from_config(config: &StudioConfig, registry: Arc<ObjectUrlRegistry>) -> StudioResult<Self> {
        let font = CaptionFont::resolve(config.font_path.as_deref())?;
        Self::new(
            Arc::new(ImageLoader::new(config.fetch_timeout)?),
            Arc::new(FfmpegRecorderFactory::new(config.ffmpeg.clone())),
            registry,
            config.motion.clone(),
            font,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/synth.rs"]
mod tests;
