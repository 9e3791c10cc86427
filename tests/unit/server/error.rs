use super::*;

#[test]
fn studio_errors_map_to_statuses() {
    let cases = [
        (StudioError::validation("x"), StatusCode::BAD_REQUEST),
        (StudioError::upstream("x"), StatusCode::BAD_GATEWAY),
        (StudioError::unsupported("x"), StatusCode::NOT_IMPLEMENTED),
        (StudioError::image_load("x"), StatusCode::INTERNAL_SERVER_ERROR),
        (StudioError::recording("x"), StatusCode::INTERNAL_SERVER_ERROR),
        (
            StudioError::from(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];
    for (err, status) in cases {
        assert_eq!(ApiError::from(err).status_code(), status);
    }
}

#[test]
fn busy_is_conflict() {
    let e = ApiError::from(SubmitError::Busy);
    assert_eq!(e.status_code(), StatusCode::CONFLICT);
}

#[test]
fn upstream_detail_is_not_exposed() {
    let e = ApiError::from(StudioError::upstream("dns failure for internal-host"));
    assert!(!e.message().contains("internal-host"));
    assert!(e.message().contains("try again later"));
}

#[test]
fn validation_message_is_kept() {
    let e = ApiError::from(StudioError::validation("Provide an image prompt or a video prompt."));
    assert_eq!(e.message(), "Provide an image prompt or a video prompt.");
}
