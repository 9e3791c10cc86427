use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{StudioError, StudioResult};

/// Well-known locations of a sans-serif face, tried in order when no caption font is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Raw font file bytes used to typeset captions.
#[derive(Clone, Debug)]
pub struct CaptionFont {
    /// Where the font was loaded from.
    pub path: PathBuf,
    /// TTF/OTF bytes.
    pub bytes: Arc<Vec<u8>>,
}

impl CaptionFont {
    /// Load a font file.
    pub fn from_path(path: &Path) -> StudioResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read caption font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(StudioError::validation(format!(
                "caption font '{}' is empty",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
            bytes: Arc::new(bytes),
        })
    }

    /// Resolve the caption font: an explicitly configured path must load; otherwise the first
    /// readable system candidate is used. `Ok(None)` means captions cannot be drawn here.
    pub fn resolve(configured: Option<&Path>) -> StudioResult<Option<Self>> {
        if let Some(p) = configured {
            return Self::from_path(p).map(Some);
        }
        let found = SYSTEM_FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .find_map(|p| Self::from_path(p).ok());
        match &found {
            Some(font) => tracing::debug!(path = %font.path.display(), "using system caption font"),
            None => tracing::warn!("no caption font found; videos will be rendered without captions"),
        }
        Ok(found)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
