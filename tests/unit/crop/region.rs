use super::*;

fn bounds(w: u32, h: u32) -> PixelSize {
    PixelSize::new(w, h).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn ratio_tokens_round_trip() {
    for token in ["free", "circle", "1", "16/9", "9/16"] {
        let ratio: AspectRatio = token.parse().unwrap();
        assert_eq!(ratio.to_string(), token);
    }
    assert_eq!(
        "16/9".parse::<AspectRatio>().unwrap(),
        AspectRatio::Ratio { num: 16, den: 9 }
    );
    assert_eq!("1".parse::<AspectRatio>().unwrap(), AspectRatio::Ratio {
        num: 1,
        den: 1
    });
}

#[test]
fn bad_ratio_tokens_are_rejected() {
    for token in ["", "abc", "0/5", "16/0", "16:9", "-1/2"] {
        assert!(token.parse::<AspectRatio>().is_err(), "token {token:?}");
    }
}

#[test]
fn ratio_serde_uses_string_tokens() {
    let json = serde_json::to_string(&AspectRatio::Ratio { num: 16, den: 9 }).unwrap();
    assert_eq!(json, "\"16/9\"");
    let back: AspectRatio = serde_json::from_str("\"circle\"").unwrap();
    assert_eq!(back, AspectRatio::Circle);
}

#[test]
fn circle_constrains_like_square() {
    assert_eq!(AspectRatio::Circle.value(), Some(1.0));
    assert!(AspectRatio::Circle.is_circle());
    assert!(!AspectRatio::Free.is_circle());
    assert_eq!(AspectRatio::Free.value(), None);
}

#[test]
fn centered_covers_the_requested_fraction() {
    let r = CropRegion::centered(bounds(4000, 3000), 0.8, None).unwrap();
    assert_eq!(r.rect(), Rect::new(400.0, 300.0, 3600.0, 2700.0));
}

#[test]
fn centered_with_ratio_fits_within_fraction() {
    let r = CropRegion::centered(bounds(4000, 3000), 0.8, Some(16.0 / 9.0)).unwrap();
    assert_eq!(r.size().width, 3200.0);
    assert!(close(r.size().height, 1800.0));
    assert!(close(r.rect().center().x, 2000.0));
    assert!(close(r.rect().center().y, 1500.0));
}

#[test]
fn from_rect_enforces_invariants() {
    let b = bounds(100, 100);
    assert!(CropRegion::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0), b).is_ok());
    assert!(CropRegion::from_rect(Rect::new(-1.0, 0.0, 50.0, 50.0), b).is_err());
    assert!(CropRegion::from_rect(Rect::new(0.0, 0.0, 101.0, 50.0), b).is_err());
    assert!(matches!(
        CropRegion::from_rect(Rect::new(10.0, 10.0, 10.0, 50.0), b),
        Err(EditorError::Precondition(_))
    ));
}

#[test]
fn with_size_keeps_center_and_exact_size() {
    let b = bounds(4000, 3000);
    let r = CropRegion::centered(b, 0.8, None).unwrap();
    let sized = r.with_size(Size::new(1920.0, 1080.0), b);
    assert_eq!(sized.size().width, 1920.0);
    assert!(close(sized.size().height, 1080.0));
    assert!(close(sized.rect().center().x, 2000.0));
    assert!(close(sized.rect().center().y, 1500.0));
}

#[test]
fn with_size_scales_down_when_larger_than_source() {
    let b = bounds(1000, 800);
    let r = CropRegion::centered(b, 0.8, None).unwrap();
    let sized = r.with_size(Size::new(1920.0, 1080.0), b);
    assert_eq!(sized.size().width, 1000.0);
    assert!((sized.size().height - 562.5).abs() < 1e-9);
}

#[test]
fn with_size_shifts_back_inside_near_an_edge() {
    let b = bounds(1000, 1000);
    let r = CropRegion::from_rect(Rect::new(900.0, 900.0, 950.0, 950.0), b).unwrap();
    let sized = r.with_size(Size::new(400.0, 400.0), b);
    assert_eq!(sized.size(), Size::new(400.0, 400.0));
    let rect = sized.rect();
    assert!(rect.x1 <= 1000.0 && rect.y1 <= 1000.0);
    assert!(rect.x0 >= 0.0 && rect.y0 >= 0.0);
}

#[test]
fn clamped_normalizes_and_shifts_drags() {
    let b = bounds(200, 200);
    // Inverted drag, partially outside.
    let r = CropRegion::clamped(Rect::new(250.0, 150.0, 150.0, 50.0), b, None).unwrap();
    let rect = r.rect();
    assert_eq!(rect.width(), 100.0);
    assert_eq!(rect.height(), 100.0);
    assert!(rect.x1 <= 200.0);
}

#[test]
fn clamped_rejects_degenerate_drags() {
    let b = bounds(200, 200);
    assert!(matches!(
        CropRegion::clamped(Rect::new(10.0, 10.0, 10.0, 10.0), b, None),
        Err(EditorError::Precondition(_))
    ));
}

#[test]
fn constrained_reshapes_around_center_within_bounds() {
    let b = bounds(4000, 3000);
    let r = CropRegion::centered(b, 0.8, None).unwrap();
    let square = r.constrained(Some(1.0), b);
    assert_eq!(square.size().width, square.size().height);
    assert!(square.size().width <= 3000.0);
    assert_eq!(square.rect().center().x, 2000.0);
}
