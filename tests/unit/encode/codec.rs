use super::*;

const LISTING: &str = "\
Encoders:
 V..... = Video
 A..... = Audio
 ------
 V....D libx264              libx264 H.264 / AVC / MPEG-4 AVC (codec h264)
 V....D libvpx               libvpx VP8 (codec vp8)
 V....D mpeg4                MPEG-4 part 2
 A....D libopus              libopus Opus (codec opus)
";

#[test]
fn parses_available_video_encoders() {
    assert_eq!(
        parse_ffmpeg_encoders(LISTING),
        vec![VideoCodec::Vp8, VideoCodec::H264]
    );
}

#[test]
fn legend_lines_are_not_encoders() {
    assert!(parse_ffmpeg_encoders(" V..... = Video\n ------\n").is_empty());
}

#[test]
fn selection_follows_preference_order() {
    let supported = [VideoCodec::H264, VideoCodec::Vp8];
    assert_eq!(
        select_codec(&DEFAULT_CODEC_PREFERENCE, &supported).unwrap(),
        VideoCodec::Vp8
    );
    assert_eq!(
        select_codec(&[VideoCodec::H264, VideoCodec::Vp8], &supported).unwrap(),
        VideoCodec::H264
    );
}

#[test]
fn nothing_supported_is_unsupported_environment() {
    let err = select_codec(&DEFAULT_CODEC_PREFERENCE, &[]).unwrap_err();
    assert!(matches!(err, StudioError::UnsupportedEnvironment(_)));
    assert!(!err.is_retryable());
}

#[test]
fn containers_and_parsing() {
    assert_eq!(VideoCodec::Vp9.extension(), "webm");
    assert_eq!(VideoCodec::H264.extension(), "mp4");
    assert!(VideoCodec::Vp8.mime().starts_with("video/webm"));
    assert_eq!("VP9".parse::<VideoCodec>().unwrap(), VideoCodec::Vp9);
    assert!("theora".parse::<VideoCodec>().is_err());
}
