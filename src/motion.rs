//! Motion synthesis: a still image plus a caption becomes a recorded pan-and-zoom clip.

/// Job description and settings.
pub(crate) mod job;
/// Frame loop and the async synthesizer.
pub(crate) mod synth;
