use chrono::TimeZone;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap()
}

#[test]
fn both_prompts_empty_is_a_validation_error() {
    let svc = PromptService::default();
    let mut rng = StdRng::seed_from_u64(0);
    let err = svc
        .generate(Some("  "), None, &mut rng, fixed_now())
        .unwrap_err();
    assert!(matches!(err, StudioError::Validation(_)));
}

#[test]
fn one_prompt_is_enough() {
    let svc = PromptService::default();
    let mut rng = StdRng::seed_from_u64(0);
    let r = svc
        .generate(None, Some("waves crashing"), &mut rng, fixed_now())
        .unwrap();
    assert!(r.enhanced_video_prompt.starts_with("waves crashing, "));
    assert!(
        r.enhanced_image_prompt
            .starts_with(PromptKind::Image.default_description())
    );
}

#[test]
fn image_url_embeds_enhanced_prompt_and_timestamp() {
    let svc = PromptService::default();
    let mut rng = StdRng::seed_from_u64(11);
    let now = fixed_now();
    let r = svc
        .generate(Some("lighthouse"), Some("storm"), &mut rng, now)
        .unwrap();
    let encoded = urlencoding::encode(&r.enhanced_image_prompt).into_owned();
    assert!(r.image_url.contains(&encoded));
    assert!(
        r.image_url
            .ends_with(&format!("&ts={}", now.timestamp_millis()))
    );
    assert_eq!(r.generated_at, now);
}

#[test]
fn seeded_generation_is_deterministic() {
    let svc = PromptService::default();
    let a = svc
        .generate(Some("a"), Some("b"), &mut StdRng::seed_from_u64(5), fixed_now())
        .unwrap();
    let b = svc
        .generate(Some("a"), Some("b"), &mut StdRng::seed_from_u64(5), fixed_now())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn serializes_camel_case() {
    let svc = PromptService::default();
    let r = svc
        .generate(Some("x"), None, &mut StdRng::seed_from_u64(1), fixed_now())
        .unwrap();
    let v = serde_json::to_value(&r).unwrap();
    for key in [
        "enhancedImagePrompt",
        "enhancedVideoPrompt",
        "imageUrl",
        "generatedAt",
    ] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
}
