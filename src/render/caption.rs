use crate::assets::font::CaptionFont;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};

/// Captions never exceed this many lines; the remainder of the text is dropped.
pub const MAX_CAPTION_LINES: usize = 3;

/// Measures the rendered width of a run of text in pixels.
pub trait TextMeasure {
    /// Width of `text` laid out on a single line.
    fn measure(&mut self, text: &str) -> f32;
}

/// Greedily pack words into lines no wider than `max_width`.
///
/// A word that alone exceeds `max_width` gets a line of its own. Lines past `max_lines` are
/// dropped without an ellipsis. Word order is preserved.
pub fn wrap_words<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: f32,
    max_lines: usize,
    measure: &mut M,
) -> Vec<String> {
    let mut lines = Vec::new();
    if max_lines == 0 {
        return lines;
    }

    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure.measure(&candidate) <= max_width {
            line = candidate;
            continue;
        }
        lines.push(std::mem::take(&mut line));
        if lines.len() == max_lines {
            return lines;
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Caption sizing relative to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionStyle {
    /// Font size as a fraction of canvas width.
    pub size_ratio: f32,
    /// Smallest font size in pixels.
    pub min_size_px: f32,
    /// Largest font size in pixels.
    pub max_size_px: f32,
    /// Line advance as a multiple of the font size.
    pub line_height: f32,
    /// Wrap width as a fraction of canvas width.
    pub max_width_ratio: f32,
    /// Gap between the last baseline and the bottom edge, as a fraction of canvas height.
    pub bottom_margin_ratio: f32,
    /// Fraction of the canvas height covered by the bottom shade.
    pub shade_height_ratio: f32,
    /// Shade opacity at the bottom edge.
    pub shade_max_alpha: f32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            size_ratio: 0.045,
            min_size_px: 14.0,
            max_size_px: 48.0,
            line_height: 1.3,
            max_width_ratio: 0.9,
            bottom_margin_ratio: 0.07,
            shade_height_ratio: 0.4,
            shade_max_alpha: 0.65,
        }
    }
}

impl CaptionStyle {
    /// Font size for `canvas`.
    pub fn font_size(&self, canvas: Canvas) -> f32 {
        (canvas.width as f32 * self.size_ratio).clamp(self.min_size_px, self.max_size_px)
    }

    /// Validate ratios and sizes.
    pub fn validate(&self) -> StudioResult<()> {
        let unit = [
            ("max_width_ratio", self.max_width_ratio),
            ("bottom_margin_ratio", self.bottom_margin_ratio),
            ("shade_height_ratio", self.shade_height_ratio),
            ("shade_max_alpha", self.shade_max_alpha),
        ];
        for (name, v) in unit {
            if !(0.0..=1.0).contains(&v) {
                return Err(StudioError::validation(format!(
                    "caption {name} must be within [0, 1] (got {v})"
                )));
            }
        }
        if !(self.min_size_px > 0.0 && self.min_size_px <= self.max_size_px) {
            return Err(StudioError::validation(
                "caption font sizes must satisfy 0 < min_size_px <= max_size_px",
            ));
        }
        if !(self.size_ratio > 0.0 && self.line_height > 0.0) {
            return Err(StudioError::validation(
                "caption size_ratio and line_height must be > 0",
            ));
        }
        Ok(())
    }
}

/// One positioned caption line.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLine {
    /// Line text.
    pub text: String,
    /// Measured width in pixels.
    pub width: f32,
    /// Left edge so the line is horizontally centered.
    pub x: f32,
    /// Baseline position.
    pub baseline: f32,
}

/// Caption lines placed bottom-up from the anchor near the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionPlan {
    /// Font size in pixels.
    pub font_size: f32,
    /// Lines in reading order.
    pub lines: Vec<CaptionLine>,
}

/// Wrap `text` and position the lines: centered, bottom-aligned, last line anchored at the
/// bottom margin.
pub fn plan_caption<M: TextMeasure + ?Sized>(
    text: &str,
    canvas: Canvas,
    style: &CaptionStyle,
    measure: &mut M,
) -> CaptionPlan {
    let font_size = style.font_size(canvas);
    let w = canvas.width as f32;
    let h = canvas.height as f32;
    let max_width = w * style.max_width_ratio;

    let wrapped = wrap_words(text, max_width, MAX_CAPTION_LINES, measure);
    let advance = font_size * style.line_height;
    let last_baseline = h - (h * style.bottom_margin_ratio).max(font_size * 0.5);
    let n = wrapped.len();

    let lines = wrapped
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = measure.measure(&text);
            CaptionLine {
                x: ((w - width) / 2.0).max(0.0),
                baseline: last_baseline - (n - 1 - i) as f32 * advance,
                width,
                text,
            }
        })
        .collect();

    CaptionPlan { font_size, lines }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct CaptionBrush {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Parley-backed typesetter for a single caption font at a fixed size.
pub(crate) struct CaptionTypesetter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<CaptionBrush>,
    family_name: String,
    size_px: f32,
}

impl CaptionTypesetter {
    pub(crate) fn new(font: &CaptionFont, size_px: f32) -> StudioResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(StudioError::validation(
                "caption size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StudioError::validation(format!(
                "no font families registered from '{}'",
                font.path.display()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StudioError::validation("registered caption font has no family name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            size_px,
        })
    }

    /// Shape `text` on one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        brush: CaptionBrush,
    ) -> parley::Layout<CaptionBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<CaptionBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextMeasure for CaptionTypesetter {
    fn measure(&mut self, text: &str) -> f32 {
        self.layout_line(text, CaptionBrush::default()).width()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
