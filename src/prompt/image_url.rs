use rand::Rng;

use crate::foundation::error::{StudioError, StudioResult};

/// Public image-generation endpoint used by default.
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://image.pollinations.ai/prompt";

/// Upper bound (exclusive) for generated seeds.
pub const SEED_RANGE: u32 = 1_000_000;

/// External image-generation endpoint template.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageEndpoint {
    /// Base URL; the encoded prompt is appended as the last path segment.
    pub base_url: String,
    /// Requested image width.
    pub width: u32,
    /// Requested image height.
    pub height: u32,
}

impl Default for ImageEndpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_IMAGE_ENDPOINT.to_string(),
            width: 768,
            height: 768,
        }
    }
}

impl ImageEndpoint {
    /// Validate the endpoint template.
    pub fn validate(&self) -> StudioResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(StudioError::validation(format!(
                "image endpoint '{}' must be an http(s) URL",
                self.base_url
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(StudioError::validation(
                "image endpoint width/height must be non-zero",
            ));
        }
        Ok(())
    }

    /// Render the request URL for `prompt`. Pure: same inputs, same URL.
    pub fn build_url(&self, prompt: &str, seed: u32, ts_ms: i64) -> String {
        format!(
            "{}/{}?width={}&height={}&nologo=true&seed={}&ts={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(prompt),
            self.width,
            self.height,
            seed,
            ts_ms
        )
    }

    /// Render the request URL with a seed drawn from `rng`.
    pub fn build_url_seeded<R: Rng + ?Sized>(&self, prompt: &str, rng: &mut R, ts_ms: i64) -> String {
        let seed = rng.random_range(0..SEED_RANGE);
        self.build_url(prompt, seed, ts_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/image_url.rs"]
mod tests;
