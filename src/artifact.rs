//! Recorded videos and the object URLs that expose them.
//!
//! An object URL is an opaque in-memory reference (`/videos/<token>`) to recorded bytes. It stays
//! valid until revoked; revoking drops the registry's reference to the bytes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::Bytes;

use crate::encode::codec::VideoCodec;
use crate::encode::sink::RecordedVideo;

/// File stem used for every downloaded video.
pub const VIDEO_FILE_STEM: &str = "ken-burns";

/// Path prefix of object URLs created by [`ObjectUrlRegistry::with_default_prefix`].
pub const DEFAULT_URL_PREFIX: &str = "/videos/";

/// Bytes behind one object URL.
#[derive(Debug)]
pub struct StoredVideo {
    /// Container bytes, shared with the artifact that created them.
    pub bytes: Bytes,
    /// Codec of the container.
    pub codec: VideoCodec,
    /// Download filename.
    pub filename: String,
}

/// A finished recording and the URL it is reachable under.
#[derive(Clone, Debug)]
pub struct VideoArtifact {
    /// Container bytes.
    pub bytes: Bytes,
    /// Object URL registered for the bytes.
    pub url: String,
    /// Codec of the container.
    pub codec: VideoCodec,
    /// Download filename, `ken-burns.<ext>`.
    pub filename: String,
}

impl VideoArtifact {
    /// MIME type for playback.
    pub fn mime(&self) -> &'static str {
        self.codec.mime()
    }
}

/// Download filename for `codec`.
pub fn video_filename(codec: VideoCodec) -> String {
    format!("{VIDEO_FILE_STEM}.{}", codec.extension())
}

/// Registry of live object URLs.
#[derive(Debug)]
pub struct ObjectUrlRegistry {
    prefix: String,
    entries: Mutex<HashMap<String, Arc<StoredVideo>>>,
}

impl Default for ObjectUrlRegistry {
    fn default() -> Self {
        Self::with_default_prefix()
    }
}

impl ObjectUrlRegistry {
    /// Registry whose URLs start with `prefix` (for example `/videos/`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Registry using [`DEFAULT_URL_PREFIX`].
    pub fn with_default_prefix() -> Self {
        Self::new(DEFAULT_URL_PREFIX)
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<StoredVideo>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register `video` under a fresh URL.
    pub fn create(&self, video: RecordedVideo) -> VideoArtifact {
        let token = uuid::Uuid::new_v4().simple().to_string();
        let url = format!("{}{token}", self.prefix);
        let bytes = Bytes::from(video.bytes);
        let filename = video_filename(video.codec);

        self.entries().insert(
            token,
            Arc::new(StoredVideo {
                bytes: bytes.clone(),
                codec: video.codec,
                filename: filename.clone(),
            }),
        );
        tracing::debug!(%url, bytes = bytes.len(), "object url created");

        VideoArtifact {
            bytes,
            url,
            codec: video.codec,
            filename,
        }
    }

    /// Release `url`. Returns `false` when it was unknown or already revoked.
    pub fn revoke(&self, url: &str) -> bool {
        let Some(token) = url.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        let removed = self.entries().remove(token).is_some();
        if removed {
            tracing::debug!(%url, "object url revoked");
        }
        removed
    }

    /// Look up the bytes behind a token (the URL without its prefix).
    pub fn resolve(&self, token: &str) -> Option<Arc<StoredVideo>> {
        self.entries().get(token).cloned()
    }

    /// Look up the bytes behind a full object URL.
    pub fn resolve_url(&self, url: &str) -> Option<Arc<StoredVideo>> {
        url.strip_prefix(self.prefix.as_str())
            .and_then(|token| self.resolve(token))
    }

    /// Number of URLs currently live.
    pub fn live_count(&self) -> usize {
        self.entries().len()
    }
}

#[cfg(test)]
#[path = "../tests/unit/artifact.rs"]
mod tests;
