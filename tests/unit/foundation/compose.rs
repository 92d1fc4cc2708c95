use super::*;

#[test]
fn transparent_source_keeps_destination() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    let src = [200, 100, 50, 255];
    assert_eq!(over([10, 20, 30, 255], src), src);
}

#[test]
fn half_black_over_white_is_mid_gray() {
    let white = [255, 255, 255, 255];
    let half_black = [0, 0, 0, 128];
    let out = over(white, half_black);
    assert_eq!(out[3], 255);
    assert!(out[0] == 127 && out[1] == 127 && out[2] == 127);
}

#[test]
fn coverage_extremes() {
    let px = [100, 50, 25, 200];
    assert_eq!(scale_coverage(px, 0.0), [0, 0, 0, 0]);
    assert_eq!(scale_coverage(px, 1.0), px);
}

#[test]
fn premultiply_demultiply_round_trip() {
    let px = Rgba8 {
        r: 240,
        g: 20,
        b: 60,
        a: 255,
    };
    assert_eq!(demultiply(premultiply(px)), px);
}
