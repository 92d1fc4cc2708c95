use crate::annotate::layer::AnnotationLayer;
use crate::export::format::{ExportFormat, ExportRequest, GIF_ALPHA_THRESHOLD, JPEG_QUALITY};
use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{EditorError, EditorResult};
use crate::foundation::math::mul_div255_u8;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, Frame, ImageEncoder, Rgb, RgbImage, RgbaImage};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Encoded export output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Serialized image bytes.
    pub bytes: Vec<u8>,
    /// The format actually used (PNG after an encoder fallback).
    pub format: ExportFormat,
    /// Pixel dimensions of the exported buffer.
    pub size: PixelSize,
    /// Suggested download name, derived from the exported dimensions.
    pub file_name: String,
}

/// Merge the annotation layer onto the working buffer and serialize.
///
/// The merge pass is skipped when the layer is absent or empty. A failed
/// target encode falls back to PNG; the artifact reports the format that
/// actually produced the bytes.
#[tracing::instrument(skip(working, annotations), fields(format = %request.format))]
pub fn encode(
    working: &RgbaImage,
    annotations: Option<&AnnotationLayer>,
    request: &ExportRequest,
) -> EditorResult<ExportArtifact> {
    let (w, h) = working.dimensions();
    if w == 0 || h == 0 {
        return Err(EditorError::precondition(
            "export requires a non-empty working buffer",
        ));
    }
    let size = PixelSize::of(working);
    if let Some(target) = request.target {
        if target != size {
            return Err(EditorError::validation(
                "working buffer does not reflect the requested target size",
            ));
        }
    }

    let merged: Cow<'_, RgbaImage> = match annotations {
        Some(layer) if layer.has_content() => {
            let mut copy = working.clone();
            layer.flatten_onto(&mut copy)?;
            Cow::Owned(copy)
        }
        _ => Cow::Borrowed(working),
    };

    let (bytes, format) = match serialize(&merged, request.format) {
        Ok(bytes) => (bytes, request.format),
        Err(err) => {
            warn!(error = %err, "target encoder failed, falling back to png");
            (serialize(&merged, ExportFormat::Png)?, ExportFormat::Png)
        }
    };
    debug!(bytes = bytes.len(), "encoded export");

    Ok(ExportArtifact {
        file_name: format!(
            "cropea-{}x{}px.{}",
            size.width,
            size.height,
            format.extension()
        ),
        bytes,
        format,
        size,
    })
}

fn serialize(buffer: &RgbaImage, format: ExportFormat) -> EditorResult<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        ExportFormat::Png => {
            PngEncoder::new(&mut out)
                .write_image(
                    buffer.as_raw(),
                    buffer.width(),
                    buffer.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EditorError::encoding(e.to_string()))?;
        }
        ExportFormat::Jpg => {
            let rgb = flatten_over(buffer, Rgba8::WHITE);
            JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(|e| EditorError::encoding(e.to_string()))?;
        }
        ExportFormat::Webp => {
            WebPEncoder::new_lossless(&mut out)
                .write_image(
                    buffer.as_raw(),
                    buffer.width(),
                    buffer.height(),
                    ExtendedColorType::Rgba8,
                )
                .map_err(|e| EditorError::encoding(e.to_string()))?;
        }
        ExportFormat::Gif => {
            let frame = Frame::new(threshold_alpha(buffer, GIF_ALPHA_THRESHOLD));
            let mut encoder = GifEncoder::new(&mut out);
            encoder
                .encode_frame(frame)
                .map_err(|e| EditorError::encoding(e.to_string()))?;
        }
    }
    Ok(out)
}

/// Drop the alpha channel by compositing over an opaque backdrop.
fn flatten_over(buffer: &RgbaImage, backdrop: Rgba8) -> RgbImage {
    let mut out = RgbImage::new(buffer.width(), buffer.height());
    for (dst, src) in out.pixels_mut().zip(buffer.pixels()) {
        let a = u16::from(src[3]);
        let inv = 255 - a;
        *dst = Rgb([
            mul_div255_u8(u16::from(src[0]), a)
                .saturating_add(mul_div255_u8(u16::from(backdrop.r), inv)),
            mul_div255_u8(u16::from(src[1]), a)
                .saturating_add(mul_div255_u8(u16::from(backdrop.g), inv)),
            mul_div255_u8(u16::from(src[2]), a)
                .saturating_add(mul_div255_u8(u16::from(backdrop.b), inv)),
        ]);
    }
    out
}

/// GIF transparency is 1-bit: snap alpha to fully transparent or opaque.
fn threshold_alpha(buffer: &RgbaImage, threshold: u8) -> RgbaImage {
    let mut out = buffer.clone();
    for px in out.pixels_mut() {
        if px[3] < threshold {
            *px = image::Rgba([0, 0, 0, 0]);
        } else {
            px[3] = 255;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/encoder.rs"]
mod tests;
