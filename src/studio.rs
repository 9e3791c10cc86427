//! Session-level orchestration: prompts, image, motion, and the session's live video.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::artifact::{ObjectUrlRegistry, VideoArtifact};
use crate::assets::fetch::{ImageFetcher, ImageLoader};
use crate::config::StudioConfig;
use crate::encode::ffmpeg::FfmpegRecorderFactory;
use crate::encode::sink::RecorderFactory;
use crate::foundation::error::{StudioError, StudioResult};
use crate::motion::synth::MotionSynthesizer;
use crate::prompt::enhance::normalize_whitespace;
use crate::prompt::service::{GenerationResult, PromptService};

/// Prompts submitted by a user. Either may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Prompt describing the still image.
    #[serde(default)]
    pub image_prompt: Option<String>,
    /// Prompt describing the motion; also used as the caption.
    #[serde(default)]
    pub video_prompt: Option<String>,
}

impl Submission {
    /// Caption drawn over the video: the video prompt, or the image prompt when that is empty.
    pub fn caption(&self) -> String {
        let video = normalize_whitespace(self.video_prompt.as_deref().unwrap_or_default());
        if video.is_empty() {
            normalize_whitespace(self.image_prompt.as_deref().unwrap_or_default())
        } else {
            video
        }
    }
}

/// A successful submission.
#[derive(Clone, Debug)]
pub struct Completed {
    /// Enhanced prompts and image URL.
    pub result: GenerationResult,
    /// The session's new live video.
    pub video: VideoArtifact,
}

/// Why a submission produced no video.
#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    /// Another submission for the same session is still running; this one was ignored.
    #[error("a submission is already in progress for this session")]
    Busy,
    /// The submission ran and failed.
    #[error(transparent)]
    Failed(#[from] StudioError),
}

impl SubmitError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Busy => "A video is already being generated. Please wait for it to finish."
                .to_string(),
            Self::Failed(e) => e.user_message(),
        }
    }
}

#[derive(Debug, Default)]
struct SessionSlot {
    in_flight: bool,
    live: Option<VideoArtifact>,
}

type Sessions = Mutex<HashMap<String, SessionSlot>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// Clears the session's in-flight flag when the submission ends, including on cancellation.
/// Sessions without a live video are dropped along with the guard.
struct InFlight<'a> {
    sessions: &'a Sessions,
    session: &'a str,
}

impl<'a> InFlight<'a> {
    fn acquire(sessions: &'a Sessions, session: &'a str) -> Option<Self> {
        let mut map = lock(sessions);
        let slot = map.entry(session.to_owned()).or_default();
        if slot.in_flight {
            return None;
        }
        slot.in_flight = true;
        Some(Self { sessions, session })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut map = lock(self.sessions);
        let Some(slot) = map.get_mut(self.session) else {
            return;
        };
        slot.in_flight = false;
        // A session that never produced a video keeps no slot.
        if slot.live.is_none() {
            map.remove(self.session);
        }
    }
}

/// Runs the full prompt-to-video flow per session.
pub struct Studio<F, R> {
    prompts: PromptService,
    synth: MotionSynthesizer<F, R>,
    rng: Mutex<StdRng>,
    sessions: Sessions,
}

impl<F, R> Studio<F, R>
where
    F: ImageFetcher,
    R: RecorderFactory + 'static,
{
    /// Assemble a studio. `rng` drives descriptor sampling and image seeds.
    pub fn new(prompts: PromptService, synth: MotionSynthesizer<F, R>, rng: StdRng) -> Self {
        Self {
            prompts,
            synth,
            rng: Mutex::new(rng),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Prompt service used for every submission.
    pub fn prompts(&self) -> &PromptService {
        &self.prompts
    }

    /// Registry holding every live object URL.
    pub fn registry(&self) -> &Arc<ObjectUrlRegistry> {
        self.synth.registry()
    }

    /// Enhance prompts and build the image URL without synthesizing a video.
    pub fn generate(&self, submission: &Submission) -> StudioResult<GenerationResult> {
        let mut rng = lock(&self.rng);
        self.prompts.generate(
            submission.image_prompt.as_deref(),
            submission.video_prompt.as_deref(),
            &mut *rng,
            chrono::Utc::now(),
        )
    }

    /// Run one submission for `session`.
    ///
    /// A submission arriving while another one for the same session is running is ignored and
    /// reported as [`SubmitError::Busy`]. On success the session's previous video URL is revoked
    /// before the new artifact is returned.
    #[tracing::instrument(skip(self, submission))]
    pub async fn submit(
        &self,
        session: &str,
        submission: &Submission,
    ) -> Result<Completed, SubmitError> {
        let Some(_in_flight) = InFlight::acquire(&self.sessions, session) else {
            tracing::debug!("ignoring resubmission while pending");
            return Err(SubmitError::Busy);
        };

        match self.run(submission).await {
            Ok((result, video)) => {
                self.replace_live(session, video.clone());
                tracing::info!(url = %video.url, codec = %video.codec, "video ready");
                Ok(Completed { result, video })
            }
            Err(e) => {
                tracing::warn!(error = %e, retryable = e.is_retryable(), "submission failed");
                Err(SubmitError::Failed(e))
            }
        }
    }

    async fn run(&self, submission: &Submission) -> StudioResult<(GenerationResult, VideoArtifact)> {
        let result = self.generate(submission)?;
        let video = self
            .synth
            .synthesize(&result.image_url, &submission.caption())
            .await?;
        Ok((result, video))
    }

    fn replace_live(&self, session: &str, video: VideoArtifact) {
        let mut map = lock(&self.sessions);
        let slot = map.entry(session.to_owned()).or_default();
        if let Some(prev) = slot.live.take() {
            self.registry().revoke(&prev.url);
        }
        slot.live = Some(video);
    }

    /// The session's current video, if any.
    pub fn live_artifact(&self, session: &str) -> Option<VideoArtifact> {
        lock(&self.sessions).get(session).and_then(|s| s.live.clone())
    }

    /// Forget `session` and revoke its live URL. Returns `false` for unknown sessions.
    pub fn close_session(&self, session: &str) -> bool {
        let Some(slot) = lock(&self.sessions).remove(session) else {
            return false;
        };
        if let Some(live) = slot.live {
            self.registry().revoke(&live.url);
        }
        true
    }
}

/// Studio backed by the network image loader and the system `ffmpeg`.
pub type SystemStudio = Studio<ImageLoader, FfmpegRecorderFactory>;

impl Studio<ImageLoader, FfmpegRecorderFactory> {
    /// Wire a studio from `config`.
    pub fn from_config(config: &StudioConfig) -> StudioResult<Self> {
        config.validate()?;
        let registry = Arc::new(ObjectUrlRegistry::default());
        let synth = MotionSynthesizer::from_config(config, registry)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(
            PromptService::new(config.image_endpoint.clone()),
            synth,
            rng,
        ))
    }
}

#[cfg(test)]
#[path = "../tests/unit/studio.rs"]
mod tests;
