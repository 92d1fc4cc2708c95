//! Cropea is a deterministic image-editing core.
//!
//! It turns a source image, a crop rectangle, an optional circular mask and a
//! pen-stroke annotation layer into one encoded raster image whose pixels
//! match the on-screen preview exactly. UI wiring stays outside the crate;
//! the public API is session-oriented:
//!
//! - Construct an [`EditorSession`] with [`EditorSessionOpts`]
//! - Feed it [`EditorEvent`]s gathered by the UI layer
//! - Render its projections (crop geometry, dimension label, live strokes)
//! - Receive an [`ExportArtifact`] when an export event completes
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Pen stroke model and annotation surfaces.
pub mod annotate;
/// Crop region selection and pixel extraction.
pub mod crop;
/// Raster format policy and export encoding.
pub mod export;
/// Display-space to native-space coordinate mapping.
pub mod geometry;
/// Circular mask application.
pub mod mask;
/// Session-oriented editor API.
pub mod session;

pub use crate::foundation::core::{PixelSize, Point, Rect, Rgba8, Rgba8Premul, Size, Vec2};
pub use crate::foundation::error::{EditorError, EditorResult};

pub use crate::annotate::layer::AnnotationLayer;
pub use crate::annotate::stroke::{PenConfig, Stroke, StrokeKind, Tool};
pub use crate::crop::engine::CropEngine;
pub use crate::crop::region::{AspectRatio, CropRegion};
pub use crate::export::encoder::ExportArtifact;
pub use crate::export::format::{ExportFormat, ExportRequest};
pub use crate::geometry::mapper::CoordinateMapper;
pub use crate::mask::circular::apply_circular_mask;
pub use crate::session::editor_session::{
    EditorSession, EditorSessionOpts, EventOutcome, FormatHint,
};
pub use crate::session::event::EditorEvent;
pub use crate::session::presets::{Preset, presets_for};
