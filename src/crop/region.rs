use crate::foundation::core::{PixelSize, Rect, Size};
use crate::foundation::error::{EditorError, EditorResult};

/// Aspect-ratio constraint for the crop rectangle.
///
/// Wire tokens: `free`, `circle`, `1`, `16/9`, `9/16`, and any positive
/// `num/den` pair. `Circle` constrains like `1` and additionally arms the
/// circular mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AspectRatio {
    /// Unconstrained rectangle.
    Free,
    /// Square rectangle that also arms the circular mask.
    Circle,
    /// Fixed positive `num/den` width-to-height constraint.
    Ratio {
        /// Width term.
        num: u32,
        /// Height term.
        den: u32,
    },
}

impl AspectRatio {
    /// Numeric `width / height` constraint, if any. `Circle` behaves as `1`.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Free => None,
            Self::Circle => Some(1.0),
            Self::Ratio { num, den } => Some(f64::from(num) / f64::from(den)),
        }
    }

    /// Whether this selection arms the circular mask.
    pub fn is_circle(self) -> bool {
        matches!(self, Self::Circle)
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = EditorError;

    fn from_str(s: &str) -> EditorResult<Self> {
        match s {
            "free" => Ok(Self::Free),
            "circle" => Ok(Self::Circle),
            "1" => Ok(Self::Ratio { num: 1, den: 1 }),
            _ => {
                let (num, den) = s.split_once('/').ok_or_else(|| {
                    EditorError::invalid_input(format!("unknown aspect ratio token '{s}'"))
                })?;
                let num: u32 = num.parse().map_err(|_| {
                    EditorError::invalid_input(format!("bad aspect ratio numerator in '{s}'"))
                })?;
                let den: u32 = den.parse().map_err(|_| {
                    EditorError::invalid_input(format!("bad aspect ratio denominator in '{s}'"))
                })?;
                if num == 0 || den == 0 {
                    return Err(EditorError::invalid_input(format!(
                        "aspect ratio terms must be positive in '{s}'"
                    )));
                }
                Ok(Self::Ratio { num, den })
            }
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Circle => write!(f, "circle"),
            Self::Ratio { num: 1, den: 1 } => write!(f, "1"),
            Self::Ratio { num, den } => write!(f, "{num}/{den}"),
        }
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = EditorError;

    fn try_from(s: String) -> EditorResult<Self> {
        s.parse()
    }
}

impl From<AspectRatio> for String {
    fn from(r: AspectRatio) -> Self {
        r.to_string()
    }
}

/// Crop rectangle in native source-image pixel space.
///
/// Always lies within its source bounds with positive area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRegion {
    rect: Rect,
}

impl CropRegion {
    /// Validate a rectangle against the source bounds without adjusting it.
    pub fn from_rect(rect: Rect, bounds: PixelSize) -> EditorResult<Self> {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(EditorError::precondition("crop region has zero area"));
        }
        let b = bounds.bounds();
        if rect.x0 < b.x0 || rect.y0 < b.y0 || rect.x1 > b.x1 || rect.y1 > b.y1 {
            return Err(EditorError::validation(
                "crop region exceeds the source bounds",
            ));
        }
        Ok(Self { rect })
    }

    /// Auto-placed centered region covering `fraction` of each source axis,
    /// constrained to `ratio` when given.
    pub fn centered(bounds: PixelSize, fraction: f64, ratio: Option<f64>) -> EditorResult<Self> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EditorError::validation(
                "auto region fraction must be in (0, 1]",
            ));
        }
        let b = bounds.to_size();
        let (w, h) = fitted_size(b.width * fraction, b.height * fraction, b, ratio);
        let rect = Rect::new(
            (b.width - w) / 2.0,
            (b.height - h) / 2.0,
            (b.width - w) / 2.0 + w,
            (b.height - h) / 2.0 + h,
        );
        Self::from_rect(rect, bounds)
    }

    /// Clamp an interactively dragged rectangle into bounds, enforcing `ratio`.
    ///
    /// Negative drags are normalized; the size is limited to what fits and the
    /// origin is shifted back inside the source.
    pub fn clamped(rect: Rect, bounds: PixelSize, ratio: Option<f64>) -> EditorResult<Self> {
        let rect = rect.abs();
        if rect.width() < 1.0 || (ratio.is_none() && rect.height() < 1.0) {
            return Err(EditorError::precondition("crop region has zero area"));
        }
        let (w, h) = fitted_size(rect.width(), rect.height(), bounds.to_size(), ratio);
        let placed = Rect::new(rect.x0, rect.y0, rect.x0 + w, rect.y0 + h);
        Self::from_rect(shift_into(placed, bounds.bounds()), bounds)
    }

    /// Preset application: the exact requested size with the current center
    /// fixed, scaled down proportionally when it exceeds the source and
    /// shifted back inside the bounds.
    pub fn with_size(self, size: Size, bounds: PixelSize) -> Self {
        let ratio = size.width / size.height;
        let (w, h) = fitted_size(size.width, size.height, bounds.to_size(), Some(ratio));
        let c = self.rect.center();
        let placed = Rect::new(c.x - w / 2.0, c.y - h / 2.0, c.x + w / 2.0, c.y + h / 2.0);
        Self {
            rect: shift_into(placed, bounds.bounds()),
        }
    }

    /// Re-constrain to a new ratio, preserving the center and width where the
    /// bounds allow it.
    pub fn constrained(self, ratio: Option<f64>, bounds: PixelSize) -> Self {
        let Some(v) = ratio else {
            return self;
        };
        let (w, h) = fitted_size(self.rect.width(), self.rect.width() / v, bounds.to_size(), Some(v));
        let c = self.rect.center();
        let placed = Rect::new(c.x - w / 2.0, c.y - h / 2.0, c.x + w / 2.0, c.y + h / 2.0);
        Self {
            rect: shift_into(placed, bounds.bounds()),
        }
    }

    /// The rectangle in native pixel space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Floating-point size of the region.
    pub fn size(&self) -> Size {
        self.rect.size()
    }

    /// Rounded pixel size of the region, at least one pixel per axis.
    pub fn pixel_size(&self) -> PixelSize {
        PixelSize {
            width: (self.rect.width().round() as u32).max(1),
            height: (self.rect.height().round() as u32).max(1),
        }
    }

    /// Integer pixel rectangle `(x, y, width, height)` clipped to `bounds`.
    pub(crate) fn to_pixels(&self, bounds: PixelSize) -> (u32, u32, u32, u32) {
        let x = (self.rect.x0.round().max(0.0) as u32).min(bounds.width.saturating_sub(1));
        let y = (self.rect.y0.round().max(0.0) as u32).min(bounds.height.saturating_sub(1));
        let w = (self.rect.width().round() as u32)
            .clamp(1, bounds.width - x);
        let h = (self.rect.height().round() as u32)
            .clamp(1, bounds.height - y);
        (x, y, w, h)
    }
}

/// Limit a requested size to what fits inside `bounds`, keeping `ratio` exact
/// when one is given (the width wins, then shrinks if the height overflows).
fn fitted_size(w: f64, h: f64, bounds: Size, ratio: Option<f64>) -> (f64, f64) {
    match ratio {
        None => (w.clamp(1.0, bounds.width), h.clamp(1.0, bounds.height)),
        Some(v) => {
            let max_w = bounds.width.min(bounds.height * v);
            let w = if max_w >= 1.0 {
                w.clamp(1.0, max_w)
            } else {
                max_w
            };
            (w, w / v)
        }
    }
}

/// Translate `rect` so it lies inside `bounds`, intersecting as a last resort
/// when it is larger than the bounds on an axis.
fn shift_into(rect: Rect, bounds: Rect) -> Rect {
    let mut dx = 0.0;
    if rect.x0 < bounds.x0 {
        dx = bounds.x0 - rect.x0;
    } else if rect.x1 > bounds.x1 {
        dx = bounds.x1 - rect.x1;
    }
    let mut dy = 0.0;
    if rect.y0 < bounds.y0 {
        dy = bounds.y0 - rect.y0;
    } else if rect.y1 > bounds.y1 {
        dy = bounds.y1 - rect.y1;
    }
    Rect::new(rect.x0 + dx, rect.y0 + dy, rect.x1 + dx, rect.y1 + dy).intersect(bounds)
}

#[cfg(test)]
#[path = "../../tests/unit/crop/region.rs"]
mod tests;
