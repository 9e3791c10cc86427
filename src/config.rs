//! Runtime configuration.
//!
//! Every field has a default; `STILLMOTION_*` environment variables override them and CLI flags
//! override the environment. Unparsable environment values fall back to the default.

use std::path::PathBuf;
use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::ken_burns::KenBurns;
use crate::encode::codec::VideoCodec;
use crate::foundation::core::Fps;
use crate::foundation::error::StudioResult;
use crate::motion::job::{MotionSettings, Pacing};
use crate::prompt::image_url::ImageEndpoint;

/// Service and pipeline configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    /// Listen host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Image-generation endpoint template.
    pub image_endpoint: ImageEndpoint,
    /// Motion synthesis settings.
    pub motion: MotionSettings,
    /// Per-request bound on image fetches; `None` keeps the network stack's defaults.
    pub fetch_timeout: Option<Duration>,
    /// Caption font file; system fonts are searched when unset.
    pub font_path: Option<PathBuf>,
    /// `ffmpeg` executable.
    pub ffmpeg: PathBuf,
    /// Seed for prompt sampling; random when unset.
    pub seed: Option<u64>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            image_endpoint: ImageEndpoint::default(),
            motion: MotionSettings::default(),
            fetch_timeout: None,
            font_path: None,
            ffmpeg: PathBuf::from("ffmpeg"),
            seed: None,
        }
    }
}

impl StudioConfig {
    /// Create config from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();
        let dm = d.motion.clone();

        let fps = lookup("STILLMOTION_FPS")
            .and_then(|v| parse_fps(&v))
            .unwrap_or(dm.fps);
        let codecs = lookup("STILLMOTION_CODECS")
            .map(|v| parse_codecs(&v))
            .filter(|c| !c.is_empty())
            .unwrap_or(dm.codecs);

        Self {
            host: lookup("STILLMOTION_HOST").unwrap_or(d.host),
            port: var(&lookup, "STILLMOTION_PORT").unwrap_or(d.port),
            image_endpoint: ImageEndpoint {
                base_url: lookup("STILLMOTION_IMAGE_ENDPOINT").unwrap_or(d.image_endpoint.base_url),
                width: var(&lookup, "STILLMOTION_IMAGE_WIDTH").unwrap_or(d.image_endpoint.width),
                height: var(&lookup, "STILLMOTION_IMAGE_HEIGHT").unwrap_or(d.image_endpoint.height),
            },
            motion: MotionSettings {
                fps,
                duration_ms: var(&lookup, "STILLMOTION_DURATION_MS").unwrap_or(dm.duration_ms),
                max_edge: var(&lookup, "STILLMOTION_MAX_EDGE").unwrap_or(dm.max_edge),
                grace_ms: var(&lookup, "STILLMOTION_GRACE_MS").unwrap_or(dm.grace_ms),
                codecs,
                pacing: var::<Pacing>(&lookup, "STILLMOTION_PACING").unwrap_or(dm.pacing),
                ken_burns: KenBurns {
                    ease: var::<Ease>(&lookup, "STILLMOTION_EASE").unwrap_or(dm.ken_burns.ease),
                    ..dm.ken_burns
                },
                ..dm
            },
            fetch_timeout: var(&lookup, "STILLMOTION_FETCH_TIMEOUT_SECS")
                .filter(|s: &u64| *s > 0)
                .map(Duration::from_secs),
            font_path: lookup("STILLMOTION_FONT").map(PathBuf::from),
            ffmpeg: lookup("STILLMOTION_FFMPEG")
                .map(PathBuf::from)
                .unwrap_or(d.ffmpeg),
            seed: var(&lookup, "STILLMOTION_SEED"),
        }
    }

    /// Validate nested settings.
    pub fn validate(&self) -> StudioResult<()> {
        self.image_endpoint.validate()?;
        self.motion.validate()
    }

    /// `host:port` to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// Parse `30`, `30/1` or `30000/1001`.
pub fn parse_fps(s: &str) -> Option<Fps> {
    let s = s.trim();
    let (num, den) = match s.split_once('/') {
        Some((n, d)) => (n.trim().parse().ok()?, d.trim().parse().ok()?),
        None => (s.parse().ok()?, 1),
    };
    Fps::new(num, den).ok()
}

/// Parse a comma-separated codec list, skipping unknown entries.
pub fn parse_codecs(s: &str) -> Vec<VideoCodec> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .filter_map(|part| part.parse().ok())
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
