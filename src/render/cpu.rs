use std::sync::Arc;

use crate::animation::ken_burns::CameraPose;
use crate::assets::decode::PreparedImage;
use crate::assets::font::CaptionFont;
use crate::foundation::core::{Affine, Canvas, Vec2};
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::caption::{
    CaptionBrush, CaptionPlan, CaptionStyle, CaptionTypesetter, plan_caption,
};
use crate::render::frame::FrameRGBA;

const CAPTION_FILL: CaptionBrush = CaptionBrush {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};
const CAPTION_SHADOW: CaptionBrush = CaptionBrush {
    r: 0,
    g: 0,
    b: 0,
    a: 140,
};

struct CaptionRun {
    layout: parley::Layout<CaptionBrush>,
    shadow: parley::Layout<CaptionBrush>,
    origin: Vec2,
}

struct PreparedCaption {
    runs: Vec<CaptionRun>,
    font: vello_cpu::peniko::FontData,
    shadow_offset: f64,
}

/// CPU frame renderer for one motion job.
///
/// Everything that does not depend on time (image paint, shade, shaped caption) is prepared once
/// in [`FrameRenderer::new`]; [`FrameRenderer::render`] only re-issues draw calls.
pub struct FrameRenderer {
    canvas: Canvas,
    image: vello_cpu::Image,
    shade: Option<(vello_cpu::Image, f64, f64)>,
    caption: Option<PreparedCaption>,
    caption_plan: Option<CaptionPlan>,
    ctx: vello_cpu::RenderContext,
    target: vello_cpu::Pixmap,
}

impl FrameRenderer {
    /// Prepare a renderer for `image` (already resampled to `canvas`).
    ///
    /// `caption` is skipped when `font` is `None` or the text is blank.
    pub fn new(
        canvas: Canvas,
        image: &PreparedImage,
        caption: &str,
        font: Option<&CaptionFont>,
        style: &CaptionStyle,
    ) -> StudioResult<Self> {
        if (image.width, image.height) != (canvas.width, canvas.height) {
            return Err(StudioError::validation(format!(
                "prepared image is {}x{}, expected canvas {}x{}",
                image.width, image.height, canvas.width, canvas.height
            )));
        }
        let (w16, h16) = canvas_u16(canvas)?;

        let image_paint = rgba_premul_to_image(&image.rgba8_premul, canvas.width, canvas.height)?;
        let shade = shade_paint(canvas, style)?;

        let (caption, caption_plan) = match font {
            Some(font) if !caption.trim().is_empty() => {
                let (prepared, plan) = prepare_caption(caption, canvas, font, style)?;
                (Some(prepared), Some(plan))
            }
            _ => (None, None),
        };

        Ok(Self {
            canvas,
            image: image_paint,
            shade,
            caption,
            caption_plan,
            ctx: vello_cpu::RenderContext::new(w16, h16),
            target: vello_cpu::Pixmap::new(w16, h16),
        })
    }

    /// Caption lines as laid out for this job, if a caption is drawn.
    pub fn caption_plan(&self) -> Option<&CaptionPlan> {
        self.caption_plan.as_ref()
    }

    /// Draw one frame for `pose`.
    pub fn render(&mut self, pose: &CameraPose) -> StudioResult<FrameRGBA> {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let ctx = &mut self.ctx;
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        ctx.set_transform(affine_to_cpu(pose.image_transform(self.canvas)));
        ctx.set_paint(self.image.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        if let Some((paint, top, shade_h)) = &self.shade {
            ctx.set_transform(affine_to_cpu(Affine::translate(Vec2::new(0.0, *top))));
            ctx.set_paint(paint.clone());
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, *shade_h));
        }

        if let Some(caption) = &self.caption {
            for run in &caption.runs {
                let shadow_at = run.origin + Vec2::new(caption.shadow_offset, caption.shadow_offset);
                fill_layout(ctx, &caption.font, &run.shadow, shadow_at);
                fill_layout(ctx, &caption.font, &run.layout, run.origin);
            }
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.target);

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.target.data_as_u8_slice().to_vec(),
        })
    }
}

fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<CaptionBrush>,
    origin: Vec2,
) {
    ctx.set_transform(affine_to_cpu(Affine::translate(origin)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn prepare_caption(
    text: &str,
    canvas: Canvas,
    font: &CaptionFont,
    style: &CaptionStyle,
) -> StudioResult<(PreparedCaption, CaptionPlan)> {
    let mut typesetter = CaptionTypesetter::new(font, style.font_size(canvas))?;
    let plan = plan_caption(text, canvas, style, &mut typesetter);

    let mut runs = Vec::with_capacity(plan.lines.len());
    for line in &plan.lines {
        let layout = typesetter.layout_line(&line.text, CAPTION_FILL);
        let shadow = typesetter.layout_line(&line.text, CAPTION_SHADOW);
        // Layout space puts the first baseline at `metrics().baseline`; shift it onto the plan.
        let first_baseline = layout
            .lines()
            .next()
            .map(|l| l.metrics().baseline)
            .unwrap_or(plan.font_size);
        runs.push(CaptionRun {
            layout,
            shadow,
            origin: Vec2::new(
                f64::from(line.x),
                f64::from(line.baseline - first_baseline),
            ),
        });
    }

    let prepared = PreparedCaption {
        runs,
        font: vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.to_vec()),
            0,
        ),
        shadow_offset: (f64::from(plan.font_size) / 16.0).max(1.0),
    };
    Ok((prepared, plan))
}

/// Vertical transparent-to-black gradient covering the bottom of the canvas.
///
/// Returns the paint together with its top edge and height in canvas pixels.
fn shade_paint(
    canvas: Canvas,
    style: &CaptionStyle,
) -> StudioResult<Option<(vello_cpu::Image, f64, f64)>> {
    let shade_h = ((canvas.height as f32) * style.shade_height_ratio).round() as u32;
    if shade_h == 0 || style.shade_max_alpha <= 0.0 {
        return Ok(None);
    }
    let w = canvas.width;
    let max_a = (style.shade_max_alpha * 255.0).round().clamp(0.0, 255.0) as u16;

    let mut bytes = vec![0u8; (w as usize).saturating_mul(shade_h as usize).saturating_mul(4)];
    let last = (shade_h - 1).max(1) as f32;
    for y in 0..shade_h {
        let t = (y as f32 / last).min(1.0);
        let a = mul_div255_u16((t * 255.0).round() as u16, max_a) as u8;
        // Premultiplied black: only alpha is non-zero.
        let row = (y as usize) * (w as usize) * 4;
        for x in 0..w as usize {
            bytes[row + x * 4 + 3] = a;
        }
    }

    let img = rgba_premul_to_image(&bytes, w, shade_h)?;
    let top = f64::from(canvas.height - shade_h);
    Ok(Some((img, top, f64::from(shade_h))))
}

fn canvas_u16(canvas: Canvas) -> StudioResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| StudioError::validation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| StudioError::validation("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> StudioResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_u16(Canvas { width, height })?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(StudioError::validation("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> StudioResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
