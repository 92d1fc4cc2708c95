use crate::foundation::core::{Rgba8, Rgba8Premul};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn premultiply(px: Rgba8) -> PremulRgba8 {
    let p = Rgba8Premul::from_straight(px);
    [p.r, p.g, p.b, p.a]
}

pub(crate) fn demultiply(px: PremulRgba8) -> Rgba8 {
    Rgba8Premul {
        r: px[0],
        g: px[1],
        b: px[2],
        a: px[3],
    }
    .to_straight()
}

/// Source-over on premultiplied pixels.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Multiply a premultiplied pixel by a coverage factor in `[0, 1]`.
pub(crate) fn scale_coverage(px: PremulRgba8, coverage: f64) -> PremulRgba8 {
    let cov = ((coverage.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if cov == 255 {
        return px;
    }
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = mul_div255_u8(u16::from(px[i]), cov);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/compose.rs"]
mod tests;
