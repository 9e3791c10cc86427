use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::premul_channel;

/// Source raster resampled to the canvas, in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels (equals the canvas width).
    pub width: u32,
    /// Height in pixels (equals the canvas height).
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> StudioResult<image::RgbaImage> {
    if bytes.is_empty() {
        return Err(StudioError::image_load("image response was empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| StudioError::image_load(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Resample `rgba` to exactly `canvas` and premultiply.
///
/// The canvas shares the source aspect ratio, so the resampled image covers the canvas at zoom
/// 1.0 without cropping.
pub fn prepare_for_canvas(rgba: &image::RgbaImage, canvas: Canvas) -> PreparedImage {
    let resized;
    let src = if rgba.dimensions() == (canvas.width, canvas.height) {
        rgba
    } else {
        resized = image::imageops::resize(
            rgba,
            canvas.width,
            canvas.height,
            image::imageops::FilterType::Triangle,
        );
        &resized
    };

    let mut bytes = src.as_raw().clone();
    premultiply_rgba8_in_place(&mut bytes);
    PreparedImage {
        width: canvas.width,
        height: canvas.height,
        rgba8_premul: Arc::new(bytes),
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 255 {
            continue;
        }
        px[0] = premul_channel(px[0], a);
        px[1] = premul_channel(px[1], a);
        px[2] = premul_channel(px[2], a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
