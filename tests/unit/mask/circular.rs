use super::*;

fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(px))
}

#[test]
fn output_is_square_with_min_side() {
    let out = apply_circular_mask(&solid(64, 48, [10, 20, 30, 255]), None).unwrap();
    assert_eq!((out.width(), out.height()), (48, 48));

    let out = apply_circular_mask(&solid(30, 100, [10, 20, 30, 255]), None).unwrap();
    assert_eq!((out.width(), out.height()), (30, 30));
}

#[test]
fn corners_are_fully_transparent_without_background() {
    let out = apply_circular_mask(&solid(50, 50, [200, 100, 50, 255]), None).unwrap();
    for (x, y) in [(0, 0), (49, 0), (0, 49), (49, 49)] {
        assert_eq!(out.get_pixel(x, y), &Rgba([0, 0, 0, 0]), "corner ({x},{y})");
    }
}

#[test]
fn corners_are_exactly_the_background_when_given() {
    let out =
        apply_circular_mask(&solid(50, 50, [200, 100, 50, 255]), Some(Rgba8::WHITE)).unwrap();
    for (x, y) in [(0, 0), (49, 0), (0, 49), (49, 49)] {
        assert_eq!(
            out.get_pixel(x, y),
            &Rgba([255, 255, 255, 255]),
            "corner ({x},{y})"
        );
    }
}

#[test]
fn center_keeps_the_source_content() {
    let out = apply_circular_mask(&solid(50, 50, [200, 100, 50, 255]), None).unwrap();
    assert_eq!(out.get_pixel(25, 25), &Rgba([200, 100, 50, 255]));

    let with_bg =
        apply_circular_mask(&solid(50, 50, [200, 100, 50, 255]), Some(Rgba8::WHITE)).unwrap();
    assert_eq!(with_bg.get_pixel(25, 25), &Rgba([200, 100, 50, 255]));
}

#[test]
fn every_outside_pixel_is_pure() {
    let out = apply_circular_mask(&solid(41, 41, [200, 100, 50, 255]), None).unwrap();
    let radius = 41.0 / 2.0;
    for y in 0..41u32 {
        for x in 0..41u32 {
            let dx = f64::from(x) + 0.5 - radius;
            let dy = f64::from(y) + 0.5 - radius;
            if (dx * dx + dy * dy).sqrt() > radius {
                assert_eq!(out.get_pixel(x, y), &Rgba([0, 0, 0, 0]), "pixel ({x},{y})");
            }
        }
    }
}

#[test]
fn non_square_input_is_center_cropped() {
    // Left third red, middle third green, right third blue; masking a wide
    // buffer must sample the middle.
    let src = RgbaImage::from_fn(90, 30, |x, _| {
        if x < 30 {
            Rgba([255, 0, 0, 255])
        } else if x < 60 {
            Rgba([0, 255, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let out = apply_circular_mask(&src, None).unwrap();
    assert_eq!((out.width(), out.height()), (30, 30));
    assert_eq!(out.get_pixel(15, 15), &Rgba([0, 255, 0, 255]));
}

#[test]
fn empty_buffer_is_a_precondition_violation() {
    let empty = RgbaImage::new(0, 0);
    assert!(matches!(
        apply_circular_mask(&empty, None),
        Err(EditorError::Precondition(_))
    ));
}
