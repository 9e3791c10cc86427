use super::*;

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 200, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

#[test]
fn defaults_match_the_reference_clip() {
    let s = MotionSettings::default();
    s.validate().unwrap();
    assert_eq!(s.duration(), Duration::from_secs(6));
    assert_eq!(s.tail_frames(), 4);
    assert_eq!(s.codecs, vec![VideoCodec::Vp9, VideoCodec::Vp8, VideoCodec::H264]);
}

#[test]
fn wide_source_is_downscaled_uniformly() {
    let job = MotionJob::from_encoded(&png(1024, 512), "caption", MotionSettings::default())
        .unwrap();
    assert_eq!(
        job.canvas,
        Canvas {
            width: 768,
            height: 384
        }
    );
    assert_eq!((job.image.width, job.image.height), (768, 384));
    assert_eq!(job.image.rgba8_premul.len(), 768 * 384 * 4);
}

#[test]
fn undecodable_bytes_are_image_load_errors() {
    let err = MotionJob::from_encoded(b"definitely not a png", "", MotionSettings::default())
        .unwrap_err();
    assert!(matches!(err, StudioError::ImageLoad(_)));
}

#[test]
fn invalid_settings_are_rejected_before_decoding() {
    let settings = MotionSettings {
        duration_ms: 0,
        ..MotionSettings::default()
    };
    let err = MotionJob::from_encoded(&[], "", settings).unwrap_err();
    assert!(matches!(err, StudioError::Validation(_)));

    let settings = MotionSettings {
        codecs: Vec::new(),
        ..MotionSettings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn pacing_parses_and_builds_clocks() {
    assert_eq!("Realtime".parse::<Pacing>().unwrap(), Pacing::Realtime);
    assert!("fast".parse::<Pacing>().is_err());

    let mut clock = Pacing::Offline.clock(Fps::new(10, 1).unwrap());
    assert_eq!(clock.next_frame(), Duration::ZERO);
    assert_eq!(clock.next_frame(), Duration::from_millis(100));
}

#[test]
fn panoramic_sliver_still_gets_an_encodable_canvas() {
    let job = MotionJob::from_encoded(&png(2000, 2), "", MotionSettings::default()).unwrap();
    assert_eq!(
        job.canvas,
        Canvas {
            width: 768,
            height: 2
        }
    );
    assert_eq!(job.image.rgba8_premul.len(), 768 * 2 * 4);
}
