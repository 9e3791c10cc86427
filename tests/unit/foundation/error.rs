use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StudioError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StudioError::upstream("x")
            .to_string()
            .contains("upstream error:")
    );
    assert!(
        StudioError::unsupported("x")
            .to_string()
            .contains("unsupported environment:")
    );
    assert!(
        StudioError::image_load("x")
            .to_string()
            .contains("image load error:")
    );
    assert!(
        StudioError::recording("x")
            .to_string()
            .contains("recording error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StudioError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn unsupported_environment_is_terminal() {
    assert!(!StudioError::unsupported("no ffmpeg").is_retryable());
    assert!(!StudioError::validation("empty").is_retryable());
    assert!(StudioError::recording("pipe closed").is_retryable());
    assert!(StudioError::image_load("404").is_retryable());
    assert!(StudioError::upstream("timeout").is_retryable());
}

#[test]
fn user_message_hides_upstream_detail() {
    let msg = StudioError::upstream("connect ECONNREFUSED 10.0.0.7:443").user_message();
    assert!(!msg.contains("10.0.0.7"));
    assert!(msg.contains("try again later"));

    let msg = StudioError::validation("Provide an image or video prompt.").user_message();
    assert_eq!(msg, "Provide an image or video prompt.");
}
