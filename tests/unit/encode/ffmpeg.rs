use super::*;

#[test]
fn flatten_premul_alpha_0_returns_bg() {
    let src = vec![0u8, 0, 0, 0];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_premul_alpha_255_is_identity() {
    let src = vec![1u8, 2, 3, 255];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, src);
}

#[test]
fn flatten_premul_half_over_black() {
    let src = vec![128u8, 0, 0, 128];
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &src, [0, 0, 0, 255]).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0, 0, 0, 0], [0; 4]).is_err());
}

#[test]
fn command_streams_container_to_stdout() {
    let rec = FfmpegRecorderFactory::default()
        .open(VideoCodec::H264)
        .unwrap();
    let cmd = rec.command(&RecorderConfig {
        width: 31,
        height: 20,
        fps: Fps::new(30000, 1001).unwrap(),
    });
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let pos = |needle: &str| args.iter().position(|a| a == needle).unwrap();
    assert_eq!(args[pos("-s") + 1], "31x20");
    assert_eq!(args[pos("-r") + 1], "30000/1001");
    assert_eq!(args[pos("-c:v") + 1], "libx264");
    assert!(args.iter().any(|a| a.contains("empty_moov")));
    assert_eq!(args.last().map(String::as_str), Some("pipe:1"));
    assert!(pos("-r") < pos("-i"));
}

#[test]
fn missing_binary_reports_no_codecs() {
    let factory = FfmpegRecorderFactory::new("/nonexistent/stillmotion-ffmpeg");
    assert!(factory.supported_codecs().unwrap().is_empty());

    let mut rec = factory.open(VideoCodec::Vp9).unwrap();
    let err = rec
        .begin(RecorderConfig {
            width: 4,
            height: 4,
            fps: Fps::new(30, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, StudioError::UnsupportedEnvironment(_)));
}

#[test]
fn dropping_started_recorder_reaps_child() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let factory = FfmpegRecorderFactory::default();
    let Some(codec) = factory.supported_codecs().unwrap().first().copied() else {
        eprintln!("skipping: no supported encoder");
        return;
    };
    let mut rec = factory.open(codec).unwrap();
    rec.begin(RecorderConfig {
        width: 8,
        height: 8,
        fps: Fps::new(30, 1).unwrap(),
    })
    .unwrap();
    drop(rec);
}
