use crate::annotate::stroke::Tool;
use crate::crop::region::AspectRatio;
use crate::export::format::ExportFormat;
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};

/// Input events delivered by the UI layer.
///
/// The wire form is internally tagged JSON, e.g.
/// `{"type":"aspect_ratio_selected","ratio":"16/9"}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Raw file bytes were dropped or selected.
    ImageLoaded {
        /// Encoded image file contents.
        bytes: Vec<u8>,
    },
    /// The on-screen image box changed (resize, responsive layout).
    DisplayResized {
        /// Available display width in CSS pixels.
        width: f64,
        /// Available display height in CSS pixels.
        height: f64,
    },
    /// An aspect-ratio button was activated.
    AspectRatioSelected {
        /// The selected constraint.
        ratio: AspectRatio,
    },
    /// A preset resolution was picked for the active ratio.
    PresetSelected {
        /// Output width in pixels.
        width: u32,
        /// Output height in pixels.
        height: u32,
    },
    /// The circular mask was toggled independently of the ratio buttons.
    CircularToggled {
        /// New mask state.
        circular: bool,
    },
    /// Crop the source at the current region.
    CropRequested,
    /// A pen tool was selected (or deselected with `None`).
    ToolSelected {
        /// The tool to activate.
        tool: Option<Tool>,
    },
    /// Pen color/width changed.
    PenConfigChanged {
        /// New stroke color.
        color: Rgba8,
        /// New stroke width in display pixels, at least 1.
        width: u32,
    },
    /// Pointer pressed on the working canvas, in display coordinates.
    PenPressed {
        /// Pointer position.
        at: Point,
    },
    /// Pointer moved while pressed, in display coordinates.
    PenMoved {
        /// Pointer position.
        at: Point,
    },
    /// Pointer released; `None` when the release position is unknown
    /// (e.g. outside the window).
    PenReleased {
        /// Release position, if any.
        at: Option<Point>,
    },
    /// Clear the whole annotation layer.
    EraseAllRequested,
    /// Serialize the working canvas.
    ExportRequested {
        /// Requested raster format.
        format: ExportFormat,
    },
    /// Discard everything derived from the original and reload it.
    RevertRequested,
    /// Reset the session to its initial empty state.
    ClearRequested,
}

impl EditorEvent {
    /// Parse one event from its JSON wire form.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(|e| EditorError::invalid_input(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/event.rs"]
mod tests;
