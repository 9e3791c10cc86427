use chrono::{DateTime, Utc};
use rand::Rng;

use crate::foundation::error::{StudioError, StudioResult};
use crate::prompt::enhance::{PromptKind, enhance, normalize_whitespace};
use crate::prompt::image_url::ImageEndpoint;

/// Outcome of one prompt submission.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Image prompt with appended descriptors.
    pub enhanced_image_prompt: String,
    /// Video prompt with appended descriptors.
    pub enhanced_video_prompt: String,
    /// URL requesting the generated still image.
    pub image_url: String,
    /// When the result was produced.
    pub generated_at: DateTime<Utc>,
}

/// Prompt enhancement and image URL templating.
#[derive(Clone, Debug, Default)]
pub struct PromptService {
    endpoint: ImageEndpoint,
}

impl PromptService {
    /// Create a service targeting `endpoint`.
    pub fn new(endpoint: ImageEndpoint) -> Self {
        Self { endpoint }
    }

    /// Endpoint this service builds URLs for.
    pub fn endpoint(&self) -> &ImageEndpoint {
        &self.endpoint
    }

    /// Enhance both prompts and build the image URL.
    ///
    /// At least one prompt must contain non-whitespace text; an empty one falls back to its
    /// kind's default description.
    #[tracing::instrument(skip(self, rng))]
    pub fn generate<R: Rng + ?Sized>(
        &self,
        image_prompt: Option<&str>,
        video_prompt: Option<&str>,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> StudioResult<GenerationResult> {
        let image_prompt = normalize_whitespace(image_prompt.unwrap_or_default());
        let video_prompt = normalize_whitespace(video_prompt.unwrap_or_default());
        if image_prompt.is_empty() && video_prompt.is_empty() {
            return Err(StudioError::validation(
                "Provide an image prompt or a video prompt.",
            ));
        }

        let enhanced_image_prompt = enhance(&image_prompt, PromptKind::Image, rng);
        let enhanced_video_prompt = enhance(&video_prompt, PromptKind::Video, rng);
        let image_url =
            self.endpoint
                .build_url_seeded(&enhanced_image_prompt, rng, now.timestamp_millis());

        tracing::debug!(%image_url, "built image request");
        Ok(GenerationResult {
            enhanced_image_prompt,
            enhanced_video_prompt,
            image_url,
            generated_at: now,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/service.rs"]
mod tests;
