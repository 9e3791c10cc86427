use crate::foundation::error::{StudioError, StudioResult};

pub use kurbo::{Affine, Rect, Vec2};

/// Absolute 0-based frame index in output timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> StudioResult<Self> {
        if den == 0 {
            return Err(StudioError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(StudioError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Number of whole frames needed to cover `secs`, rounding up.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Smallest canvas edge; yuv420p encoders need at least two pixels per side.
pub const MIN_CANVAS_EDGE: u32 = 2;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Derive a canvas from source dimensions with a uniform downscale so the longer edge does
    /// not exceed `max_edge`. Sources that already fit keep their size.
    ///
    /// Each edge is at least [`MIN_CANVAS_EDGE`] pixels, so extreme aspect ratios still yield a
    /// recordable canvas.
    pub fn fit_within(src_width: u32, src_height: u32, max_edge: u32) -> StudioResult<Self> {
        if src_width == 0 || src_height == 0 {
            return Err(StudioError::image_load("source image has zero width or height"));
        }
        if max_edge == 0 {
            return Err(StudioError::validation("max_edge must be > 0"));
        }
        let longer = src_width.max(src_height);
        let scale = (f64::from(max_edge) / f64::from(longer)).min(1.0);
        let width = ((f64::from(src_width) * scale).round() as u32).max(MIN_CANVAS_EDGE);
        let height = ((f64::from(src_height) * scale).round() as u32).max(MIN_CANVAS_EDGE);
        Ok(Self { width, height })
    }

    /// Canvas bounds as a rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
