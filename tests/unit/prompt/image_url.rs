use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn url_matches_template() {
    let ep = ImageEndpoint::default();
    let url = ep.build_url("a cat, ultra detailed", 1234, 1_700_000_000_000);
    assert_eq!(
        url,
        "https://image.pollinations.ai/prompt/a%20cat%2C%20ultra%20detailed?width=768&height=768&nologo=true&seed=1234&ts=1700000000000"
    );
}

#[test]
fn reserved_characters_stay_inside_the_path_segment() {
    let ep = ImageEndpoint::default();
    let url = ep.build_url("50% off? #1 / best & more", 0, 0);
    let (path, query) = url.split_once('?').unwrap();
    assert!(!path.trim_start_matches("https://").contains('#'));
    assert_eq!(path.matches('/').count(), 4);
    assert!(query.starts_with("width=768&"));
}

#[test]
fn trailing_slash_on_base_is_tolerated() {
    let ep = ImageEndpoint {
        base_url: "http://localhost:9000/prompt/".to_string(),
        ..ImageEndpoint::default()
    };
    assert!(
        ep.build_url("x", 1, 2)
            .starts_with("http://localhost:9000/prompt/x?")
    );
}

#[test]
fn seeded_urls_are_reproducible_and_bounded() {
    let ep = ImageEndpoint::default();
    let a = ep.build_url_seeded("fox", &mut StdRng::seed_from_u64(3), 10);
    let b = ep.build_url_seeded("fox", &mut StdRng::seed_from_u64(3), 10);
    assert_eq!(a, b);

    let seed: u32 = a
        .split("seed=")
        .nth(1)
        .and_then(|s| s.split('&').next())
        .unwrap()
        .parse()
        .unwrap();
    assert!(seed < SEED_RANGE);
}

#[test]
fn validate_rejects_non_http_and_zero_size() {
    let bad = ImageEndpoint {
        base_url: "ftp://x".to_string(),
        ..ImageEndpoint::default()
    };
    assert!(bad.validate().is_err());
    let bad = ImageEndpoint {
        width: 0,
        ..ImageEndpoint::default()
    };
    assert!(bad.validate().is_err());
    assert!(ImageEndpoint::default().validate().is_ok());
}
