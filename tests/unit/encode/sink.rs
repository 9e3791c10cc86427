use super::*;

fn frame(v: u8) -> FrameRGBA {
    FrameRGBA {
        width: 1,
        height: 1,
        data: vec![v, v, v, 255],
    }
}

fn cfg() -> RecorderConfig {
    RecorderConfig {
        width: 1,
        height: 1,
        fps: Fps::new(30, 1).unwrap(),
    }
}

#[test]
fn collects_frames_in_order() {
    let mut rec = InMemoryRecorder::new(VideoCodec::Vp9);
    rec.begin(cfg()).unwrap();
    rec.push_frame(FrameIndex(0), &frame(1)).unwrap();
    rec.push_frame(FrameIndex(1), &frame(2)).unwrap();
    assert_eq!(rec.frames().len(), 2);

    let out = rec.finish().unwrap();
    assert_eq!(out.codec, VideoCodec::Vp9);
    assert_eq!(out.bytes, vec![1, 1, 1, 255, 2, 2, 2, 255]);
}

#[test]
fn rejects_repeated_index() {
    let mut rec = InMemoryRecorder::new(VideoCodec::H264);
    rec.begin(cfg()).unwrap();
    rec.push_frame(FrameIndex(3), &frame(0)).unwrap();
    let err = rec.push_frame(FrameIndex(3), &frame(0)).unwrap_err();
    assert!(matches!(err, StudioError::Recording(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut rec = InMemoryRecorder::new(VideoCodec::Vp8);
    assert!(rec.push_frame(FrameIndex(0), &frame(0)).is_err());
    assert!(rec.finish().is_err());
}
