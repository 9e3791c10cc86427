use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_gives_defaults() {
    let cfg = StudioConfig::from_lookup(|_| None);
    assert_eq!(cfg, StudioConfig::default());
    assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    assert_eq!(cfg.fetch_timeout, None);
    cfg.validate().unwrap();
}

#[test]
fn environment_overrides_fields() {
    let cfg = StudioConfig::from_lookup(lookup(&[
        ("STILLMOTION_PORT", "9000"),
        ("STILLMOTION_FPS", "30000/1001"),
        ("STILLMOTION_DURATION_MS", "3000"),
        ("STILLMOTION_CODECS", "h264, vp8"),
        ("STILLMOTION_PACING", "realtime"),
        ("STILLMOTION_EASE", "in_out_cubic"),
        ("STILLMOTION_FETCH_TIMEOUT_SECS", "20"),
        ("STILLMOTION_FONT", "/tmp/font.ttf"),
        ("STILLMOTION_SEED", "42"),
    ]));
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.motion.fps, Fps { num: 30000, den: 1001 });
    assert_eq!(cfg.motion.duration_ms, 3000);
    assert_eq!(cfg.motion.codecs, vec![VideoCodec::H264, VideoCodec::Vp8]);
    assert_eq!(cfg.motion.pacing, Pacing::Realtime);
    assert_eq!(cfg.motion.ken_burns.ease, Ease::InOutCubic);
    assert_eq!(cfg.motion.ken_burns.end_scale, 1.15);
    assert_eq!(cfg.fetch_timeout, Some(Duration::from_secs(20)));
    assert_eq!(cfg.font_path, Some(PathBuf::from("/tmp/font.ttf")));
    assert_eq!(cfg.seed, Some(42));
}

#[test]
fn unparsable_values_fall_back() {
    let cfg = StudioConfig::from_lookup(lookup(&[
        ("STILLMOTION_PORT", "not-a-port"),
        ("STILLMOTION_FPS", "0"),
        ("STILLMOTION_CODECS", "theora"),
        ("STILLMOTION_EASE", "bounce"),
        ("STILLMOTION_FETCH_TIMEOUT_SECS", "0"),
    ]));
    let d = StudioConfig::default();
    assert_eq!(cfg.port, d.port);
    assert_eq!(cfg.motion.fps, d.motion.fps);
    assert_eq!(cfg.motion.codecs, d.motion.codecs);
    assert_eq!(cfg.motion.ken_burns.ease, Ease::OutCubic);
    assert_eq!(cfg.fetch_timeout, None);
}

#[test]
fn fps_forms() {
    assert_eq!(parse_fps("24"), Some(Fps { num: 24, den: 1 }));
    assert_eq!(parse_fps(" 60 / 2 "), Some(Fps { num: 60, den: 2 }));
    assert_eq!(parse_fps("30/0"), None);
    assert_eq!(parse_fps("fast"), None);
}

#[test]
fn bad_endpoint_fails_validation() {
    let cfg = StudioConfig {
        image_endpoint: ImageEndpoint {
            base_url: "ftp://example.com".to_string(),
            ..ImageEndpoint::default()
        },
        ..StudioConfig::default()
    };
    assert!(cfg.validate().is_err());
}
