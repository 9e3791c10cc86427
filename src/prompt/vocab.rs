//! Fixed descriptor vocabularies appended to user prompts.
//!
//! Phrases never contain commas; enhanced prompts are comma-joined and must split back cleanly.

pub(crate) const IMAGE_DEFAULT: &str = "a striking landscape at golden hour";
pub(crate) const VIDEO_DEFAULT: &str = "a slow cinematic reveal";

pub(crate) const IMAGE_DESCRIPTORS: &[&str] = &[
    "ultra detailed",
    "soft volumetric lighting",
    "rich color grading",
    "shallow depth of field",
    "8k resolution",
    "dramatic composition",
    "photorealistic textures",
    "cinematic atmosphere",
    "sharp focus",
    "award winning photography",
    "subtle film grain",
    "high dynamic range",
];

pub(crate) const VIDEO_DESCRIPTORS: &[&str] = &[
    "smooth camera glide",
    "gentle parallax",
    "slow push in",
    "atmospheric haze",
    "cinematic pacing",
    "soft motion blur",
    "natural light shifts",
    "steady dolly movement",
    "dreamy mood",
    "lingering final frame",
    "elegant transitions",
    "immersive depth",
];
