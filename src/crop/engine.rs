use crate::crop::region::{AspectRatio, CropRegion};
use crate::foundation::core::{PixelSize, Rect, Size};
use crate::foundation::error::{EditorError, EditorResult};
use image::RgbaImage;
use image::imageops::FilterType;
use tracing::debug;

/// Interactive crop selection over one source image.
///
/// The engine owns the rectangle and its aspect constraint; the source buffer
/// is borrowed only at extraction time. A fresh engine auto-places its region
/// as a centered fraction of the source.
#[derive(Clone, Debug)]
pub struct CropEngine {
    bounds: PixelSize,
    aspect: AspectRatio,
    region: CropRegion,
}

impl CropEngine {
    /// Create an engine for a source of `bounds` pixels with an auto-placed
    /// centered region covering `auto_fraction` of each axis.
    pub fn new(bounds: PixelSize, aspect: AspectRatio, auto_fraction: f64) -> EditorResult<Self> {
        let region = CropRegion::centered(bounds, auto_fraction, aspect.value())?;
        Ok(Self {
            bounds,
            aspect,
            region,
        })
    }

    /// Native dimensions of the source this engine selects over.
    pub fn bounds(&self) -> PixelSize {
        self.bounds
    }

    /// The active aspect constraint.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect
    }

    /// The current crop region.
    pub fn region(&self) -> CropRegion {
        self.region
    }

    /// Constrain interactive resizing to `aspect`, reshaping the current
    /// region around its center. `Circle` constrains like `1`.
    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
        self.region = self.region.constrained(aspect.value(), self.bounds);
    }

    /// Replace the region with an interactively dragged rectangle, clamped to
    /// the source and re-constrained to the active aspect ratio.
    pub fn set_region(&mut self, rect: Rect) -> EditorResult<()> {
        self.region = CropRegion::clamped(rect, self.bounds, self.aspect.value())?;
        Ok(())
    }

    /// Force an exact output size (preset selection) while keeping the
    /// region's center fixed, re-clamped within the source bounds.
    pub fn set_region_size(&mut self, width: u32, height: u32) -> EditorResult<()> {
        if width == 0 || height == 0 {
            return Err(EditorError::precondition("preset size must be non-zero"));
        }
        self.region = self
            .region
            .with_size(Size::new(f64::from(width), f64::from(height)), self.bounds);
        Ok(())
    }

    /// Sample the source inside the current region and resample to `target`
    /// when one is given (Catmull-Rom; the region's native size otherwise).
    pub fn extract_pixels(
        &self,
        source: &RgbaImage,
        target: Option<PixelSize>,
    ) -> EditorResult<RgbaImage> {
        if PixelSize::of(source) != self.bounds {
            return Err(EditorError::validation(
                "source buffer does not match the engine bounds",
            ));
        }
        let (x, y, w, h) = self.region.to_pixels(self.bounds);
        if w == 0 || h == 0 {
            return Err(EditorError::precondition("crop region has zero area"));
        }

        let view = image::imageops::crop_imm(source, x, y, w, h).to_image();
        let out = match target {
            Some(t) if (t.width, t.height) != (w, h) => {
                image::imageops::resize(&view, t.width, t.height, FilterType::CatmullRom)
            }
            _ => view,
        };
        debug!(
            x,
            y,
            w,
            h,
            out_w = out.width(),
            out_h = out.height(),
            "extracted crop"
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/crop/engine.rs"]
mod tests;
