use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions() {
    let img = image::RgbaImage::from_pixel(1024, 512, image::Rgba([10, 20, 30, 255]));
    let rgba = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(rgba.dimensions(), (1024, 512));
}

#[test]
fn garbage_and_empty_bytes_are_image_load_errors() {
    assert!(matches!(
        decode_image(b"<html>rate limited</html>"),
        Err(StudioError::ImageLoad(_))
    ));
    assert!(matches!(decode_image(&[]), Err(StudioError::ImageLoad(_))));
}

#[test]
fn prepare_resamples_to_canvas_and_premultiplies() {
    let img = image::RgbaImage::from_pixel(1024, 512, image::Rgba([100, 50, 200, 128]));
    let canvas = Canvas::fit_within(1024, 512, 768).unwrap();
    let prepared = prepare_for_canvas(&img, canvas);
    assert_eq!((prepared.width, prepared.height), (768, 384));
    assert_eq!(prepared.rgba8_premul.len(), 768 * 384 * 4);
    assert_eq!(
        &prepared.rgba8_premul[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn prepare_keeps_pixels_when_sizes_match() {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([1, 2, 3, 255]));
    img.put_pixel(1, 0, image::Rgba([4, 5, 6, 255]));
    let prepared = prepare_for_canvas(
        &img,
        Canvas {
            width: 2,
            height: 1,
        },
    );
    assert_eq!(prepared.rgba8_premul.as_slice(), &[1, 2, 3, 255, 4, 5, 6, 255]);
}
