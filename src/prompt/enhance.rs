use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::prompt::vocab;

/// Number of descriptors appended to every prompt.
pub const DESCRIPTOR_COUNT: usize = 4;

/// Which vocabulary a prompt is enhanced with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Still image prompt.
    Image,
    /// Motion/video prompt (also used as the caption).
    Video,
}

impl PromptKind {
    /// Description used when the user leaves the prompt empty.
    pub fn default_description(self) -> &'static str {
        match self {
            Self::Image => vocab::IMAGE_DEFAULT,
            Self::Video => vocab::VIDEO_DEFAULT,
        }
    }

    /// Descriptor vocabulary for this kind.
    pub fn descriptors(self) -> &'static [&'static str] {
        match self {
            Self::Image => vocab::IMAGE_DESCRIPTORS,
            Self::Video => vocab::VIDEO_DESCRIPTORS,
        }
    }
}

/// Collapse whitespace runs into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize `prompt` (falling back to the kind's default when empty) and append
/// [`DESCRIPTOR_COUNT`] distinct descriptors in random order.
///
/// Output shape: `"{base}, {d1}, {d2}, {d3}, {d4}"`.
pub fn enhance<R: Rng + ?Sized>(prompt: &str, kind: PromptKind, rng: &mut R) -> String {
    let normalized = normalize_whitespace(prompt);
    let base = if normalized.is_empty() {
        kind.default_description().to_string()
    } else {
        normalized
    };

    let mut picked: Vec<&str> = kind
        .descriptors()
        .choose_multiple(rng, DESCRIPTOR_COUNT)
        .copied()
        .collect();
    picked.shuffle(rng);

    let mut out = base;
    for d in picked {
        out.push_str(", ");
        out.push_str(d);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/prompt/enhance.rs"]
mod tests;
