use super::*;
use image::Rgba;

fn gradient_source(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

fn engine(w: u32, h: u32, aspect: AspectRatio) -> CropEngine {
    CropEngine::new(PixelSize::new(w, h).unwrap(), aspect, 0.8).unwrap()
}

#[test]
fn extract_without_target_uses_region_size() {
    let source = gradient_source(400, 300);
    let eng = engine(400, 300, AspectRatio::Free);
    let out = eng.extract_pixels(&source, None).unwrap();
    assert_eq!((out.width(), out.height()), (320, 240));
}

#[test]
fn extract_resamples_to_target_size() {
    let source = gradient_source(400, 300);
    let eng = engine(400, 300, AspectRatio::Free);
    let target = PixelSize::new(100, 80).unwrap();
    let out = eng.extract_pixels(&source, Some(target)).unwrap();
    assert_eq!((out.width(), out.height()), (100, 80));
}

#[test]
fn extract_samples_the_selected_region() {
    let source = gradient_source(400, 300);
    let mut eng = engine(400, 300, AspectRatio::Free);
    eng.set_region(Rect::new(100.0, 50.0, 200.0, 150.0)).unwrap();
    let out = eng.extract_pixels(&source, None).unwrap();
    assert_eq!((out.width(), out.height()), (100, 100));
    // Top-left of the extraction is source pixel (100, 50).
    assert_eq!(out.get_pixel(0, 0), source.get_pixel(100, 50));
}

#[test]
fn aspect_constrained_engine_starts_with_the_ratio() {
    let eng = engine(4000, 3000, AspectRatio::Ratio { num: 16, den: 9 });
    let size = eng.region().size();
    assert!((size.width / size.height - 16.0 / 9.0).abs() < 1e-9);
}

#[test]
fn preset_sizing_yields_exact_output() {
    let source = gradient_source(4000, 3000);
    let mut eng = engine(4000, 3000, AspectRatio::Ratio { num: 16, den: 9 });
    eng.set_region_size(1920, 1080).unwrap();
    let target = PixelSize::new(1920, 1080).unwrap();
    let out = eng.extract_pixels(&source, Some(target)).unwrap();
    assert_eq!((out.width(), out.height()), (1920, 1080));
}

#[test]
fn mismatched_source_buffer_is_rejected() {
    let eng = engine(400, 300, AspectRatio::Free);
    let other = gradient_source(200, 200);
    assert!(matches!(
        eng.extract_pixels(&other, None),
        Err(EditorError::Validation(_))
    ));
}

#[test]
fn degenerate_drag_is_a_precondition_violation() {
    let mut eng = engine(400, 300, AspectRatio::Free);
    assert!(matches!(
        eng.set_region(Rect::new(10.0, 10.0, 10.0, 10.0)),
        Err(EditorError::Precondition(_))
    ));
    // The previous region survives a rejected drag.
    let source = gradient_source(400, 300);
    assert!(eng.extract_pixels(&source, None).is_ok());
}

#[test]
fn zero_preset_size_is_rejected() {
    let mut eng = engine(400, 300, AspectRatio::Free);
    assert!(eng.set_region_size(0, 100).is_err());
}

#[test]
fn circle_aspect_constrains_to_square() {
    let mut eng = engine(400, 300, AspectRatio::Free);
    eng.set_aspect_ratio(AspectRatio::Circle);
    let size = eng.region().size();
    assert_eq!(size.width, size.height);
}
