use crate::foundation::core::{Point, Rgba8};
use smallvec::SmallVec;

/// Mutually exclusive drawing tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Accumulates every intermediate pointer position, rendered segment by
    /// segment while the pointer moves.
    Freehand,
    /// Anchors on press, previews on move, commits one segment on release.
    Straight,
}

/// Pen color and width applied to newly started strokes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PenConfig {
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in display pixels, at least 1.
    pub width: u32,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            color: Rgba8::BLACK,
            width: 3,
        }
    }
}

/// Kind tag of a committed stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeKind {
    /// Freehand polyline with all intermediate points.
    Freehand,
    /// Single straight segment; exactly two points.
    Straight,
}

/// One committed stroke in display-space coordinates.
#[derive(Clone, Debug)]
pub struct Stroke {
    /// Kind tag.
    pub kind: StrokeKind,
    /// Stroke color.
    pub color: Rgba8,
    /// Stroke width in display pixels.
    pub width: u32,
    /// Ordered point list; straight strokes hold start and end only.
    pub points: SmallVec<[Point; 8]>,
}
