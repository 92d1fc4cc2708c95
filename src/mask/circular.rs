use crate::foundation::compose;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{EditorError, EditorResult};
use image::{Rgba, RgbaImage};

/// Clip a buffer to a centered circle.
///
/// The output is a square of side `min(width, height)`, center-cropped from
/// the input. Coverage is evaluated per pixel center: pixels whose center
/// lies outside the radius are exactly transparent (or exactly `background`
/// when one is given), pixels within one pixel of the edge get a partial
/// coverage ramp, everything further in keeps the source content.
///
/// `background`, when given, is painted underneath the masked content, so
/// alpha-incapable export formats still show a filled square with a circular
/// subject instead of undefined pixels.
pub fn apply_circular_mask(
    buffer: &RgbaImage,
    background: Option<Rgba8>,
) -> EditorResult<RgbaImage> {
    let (w, h) = buffer.dimensions();
    if w == 0 || h == 0 {
        return Err(EditorError::precondition(
            "circular mask requires a non-empty buffer",
        ));
    }

    let side = w.min(h);
    let dx = (w - side) / 2;
    let dy = (h - side) / 2;
    let radius = f64::from(side) / 2.0;
    let bg = background.map(compose::premultiply);

    let mut out = RgbaImage::new(side, side);
    for y in 0..side {
        for x in 0..side {
            let px = f64::from(x) + 0.5 - radius;
            let py = f64::from(y) + 0.5 - radius;
            let dist = (px * px + py * py).sqrt();
            let coverage = (radius - dist).clamp(0.0, 1.0);

            let result = if coverage <= 0.0 {
                match bg {
                    Some(b) => b,
                    None => [0, 0, 0, 0],
                }
            } else {
                let src = buffer.get_pixel(x + dx, y + dy);
                let src = compose::premultiply(Rgba8 {
                    r: src[0],
                    g: src[1],
                    b: src[2],
                    a: src[3],
                });
                let covered = compose::scale_coverage(src, coverage);
                match bg {
                    Some(b) => compose::over(b, covered),
                    None => covered,
                }
            };

            let s = compose::demultiply(result);
            out.put_pixel(x, y, Rgba([s.r, s.g, s.b, s.a]));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/circular.rs"]
mod tests;
