use crate::animation::ease::Ease;
use crate::foundation::core::{Affine, Canvas, Rect, Vec2};
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::lerp;

/// Pan-and-zoom curve over normalized time.
///
/// Zoom goes linearly (in eased time) from `start_scale` to `end_scale`. The horizontal pan grows
/// to `pan_fraction * canvas.width` and the vertical pan follows at `vertical_ratio` of it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KenBurns {
    /// Zoom at `t = 0`.
    pub start_scale: f64,
    /// Zoom at `t = 1`.
    pub end_scale: f64,
    /// Final horizontal pan as a fraction of canvas width.
    pub pan_fraction: f64,
    /// Vertical pan relative to horizontal pan.
    pub vertical_ratio: f64,
    /// Easing applied to normalized time.
    pub ease: Ease,
}

impl Default for KenBurns {
    fn default() -> Self {
        Self {
            start_scale: 1.0,
            end_scale: 1.15,
            pan_fraction: 0.05,
            vertical_ratio: 0.6,
            ease: Ease::OutCubic,
        }
    }
}

/// Camera state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Normalized time in `[0, 1]`.
    pub t: f64,
    /// Eased progress.
    pub eased: f64,
    /// Zoom factor relative to a canvas-filling image.
    pub scale: f64,
    /// Horizontal pan in pixels.
    pub pan_x: f64,
    /// Vertical pan in pixels.
    pub pan_y: f64,
}

impl KenBurns {
    /// Reject curves that would let the canvas show uncovered borders.
    pub fn validate(&self) -> StudioResult<()> {
        for (name, v) in [
            ("start_scale", self.start_scale),
            ("end_scale", self.end_scale),
        ] {
            if !v.is_finite() || v < 1.0 {
                return Err(StudioError::validation(format!(
                    "{name} must be finite and >= 1.0 (got {v})"
                )));
            }
        }
        if !self.pan_fraction.is_finite() || self.pan_fraction < 0.0 {
            return Err(StudioError::validation("pan_fraction must be finite and >= 0"));
        }
        if !self.vertical_ratio.is_finite() {
            return Err(StudioError::validation("vertical_ratio must be finite"));
        }
        Ok(())
    }

    /// Sample the camera at normalized time `t`.
    pub fn pose(&self, t: f64, canvas: Canvas) -> CameraPose {
        let t = t.clamp(0.0, 1.0);
        let eased = self.ease.apply(t);
        let pan_x = eased * self.pan_fraction * f64::from(canvas.width);
        CameraPose {
            t,
            eased,
            scale: lerp(self.start_scale, self.end_scale, eased),
            pan_x,
            pan_y: pan_x * self.vertical_ratio,
        }
    }
}

impl CameraPose {
    /// Where a canvas-sized image lands on the canvas for this pose.
    ///
    /// The image is scaled about the canvas center, shifted by the pan, then clamped so it always
    /// covers the whole canvas.
    pub fn image_rect(&self, canvas: Canvas) -> Rect {
        let cw = f64::from(canvas.width);
        let ch = f64::from(canvas.height);
        let w = cw * self.scale;
        let h = ch * self.scale;
        let x0 = ((cw - w) / 2.0 - self.pan_x).clamp((cw - w).min(0.0), 0.0);
        let y0 = ((ch - h) / 2.0 - self.pan_y).clamp((ch - h).min(0.0), 0.0);
        Rect::new(x0, y0, x0 + w, y0 + h)
    }

    /// Transform mapping canvas-sized image space into canvas space.
    pub fn image_transform(&self, canvas: Canvas) -> Affine {
        let r = self.image_rect(canvas);
        Affine::translate(Vec2::new(r.x0, r.y0)) * Affine::scale(self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ken_burns.rs"]
mod tests;
