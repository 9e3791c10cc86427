use super::*;

fn canvas() -> Canvas {
    Canvas {
        width: 768,
        height: 384,
    }
}

#[test]
fn scale_runs_from_start_to_end() {
    let kb = KenBurns::default();
    assert_eq!(kb.pose(0.0, canvas()).scale, 1.0);
    assert!((kb.pose(1.0, canvas()).scale - 1.15).abs() < 1e-12);
}

#[test]
fn vertical_pan_tracks_horizontal() {
    let kb = KenBurns::default();
    let p = kb.pose(1.0, canvas());
    assert!((p.pan_x - 0.05 * 768.0).abs() < 1e-9);
    assert!((p.pan_y - 0.6 * p.pan_x).abs() < 1e-9);

    let p0 = kb.pose(0.0, canvas());
    assert_eq!(p0.pan_x, 0.0);
    assert_eq!(p0.pan_y, 0.0);
}

#[test]
fn image_always_covers_canvas() {
    let kb = KenBurns {
        pan_fraction: 0.5,
        ..KenBurns::default()
    };
    let c = canvas();
    for i in 0..=60 {
        let r = kb.pose(f64::from(i) / 60.0, c).image_rect(c);
        assert!(r.x0 <= 1e-9 && r.y0 <= 1e-9, "gap at top-left: {r:?}");
        assert!(r.x1 >= 768.0 - 1e-9 && r.y1 >= 384.0 - 1e-9, "gap at bottom-right: {r:?}");
    }
}

#[test]
fn identity_pose_maps_image_onto_canvas() {
    let kb = KenBurns::default();
    let c = canvas();
    let r = kb.pose(0.0, c).image_rect(c);
    assert_eq!(r, Rect::new(0.0, 0.0, 768.0, 384.0));
    assert_eq!(kb.pose(0.0, c).image_transform(c), Affine::IDENTITY);
}

#[test]
fn validate_rejects_shrinking_zoom() {
    let kb = KenBurns {
        end_scale: 0.9,
        ..KenBurns::default()
    };
    assert!(kb.validate().is_err());
    assert!(KenBurns::default().validate().is_ok());
}
