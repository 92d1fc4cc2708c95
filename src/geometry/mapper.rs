use crate::foundation::core::{PixelSize, Point, Rect, Size};
use crate::foundation::error::{EditorError, EditorResult};

/// Converts between displayed (CSS-pixel) coordinates and native pixel-buffer
/// coordinates.
///
/// The two axes scale independently. A mapper is a snapshot of one geometry
/// pairing: derive a fresh one from the current native/display dimensions
/// whenever the displayed geometry changes (resize, new image, post-crop
/// re-render) instead of holding on to an old instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    sx: f64,
    sy: f64,
}

impl CoordinateMapper {
    /// Create a mapper for a native buffer shown at `display` size.
    pub fn new(native: PixelSize, display: Size) -> EditorResult<Self> {
        if !display.width.is_finite()
            || !display.height.is_finite()
            || display.width <= 0.0
            || display.height <= 0.0
        {
            return Err(EditorError::validation(
                "display size must be finite and positive",
            ));
        }
        Ok(Self {
            sx: f64::from(native.width) / display.width,
            sy: f64::from(native.height) / display.height,
        })
    }

    /// Native pixels per display pixel on the x axis.
    pub fn scale_x(&self) -> f64 {
        self.sx
    }

    /// Native pixels per display pixel on the y axis.
    pub fn scale_y(&self) -> f64 {
        self.sy
    }

    /// Map a display-space point into native space.
    pub fn to_native_point(&self, p: Point) -> Point {
        Point::new(p.x * self.sx, p.y * self.sy)
    }

    /// Map a display-space rectangle into native space.
    pub fn to_native_rect(&self, r: Rect) -> Rect {
        Rect::new(r.x0 * self.sx, r.y0 * self.sy, r.x1 * self.sx, r.y1 * self.sy)
    }

    /// Map a native-space point into display space.
    pub fn to_display_point(&self, p: Point) -> Point {
        Point::new(p.x / self.sx, p.y / self.sy)
    }

    /// Map a native-space rectangle into display space.
    pub fn to_display_rect(&self, r: Rect) -> Rect {
        Rect::new(r.x0 / self.sx, r.y0 / self.sy, r.x1 / self.sx, r.y1 / self.sy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapper.rs"]
mod tests;
