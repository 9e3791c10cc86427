use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(128, 255), 128);
    assert_eq!(mul_div255_u16(0, 200), 0);
    assert_eq!(premul_channel(200, 128), ((200u16 * 128 + 127) / 255) as u8);
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(1.0, 1.15, 0.0), 1.0);
    assert!((lerp(1.0, 1.15, 1.0) - 1.15).abs() < 1e-12);
    assert!((lerp(-2.0, 2.0, 0.5)).abs() < 1e-12);
}
