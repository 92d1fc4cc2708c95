use crate::annotate::layer::AnnotationLayer;
use crate::annotate::stroke::{PenConfig, Stroke, Tool};
use crate::crop::engine::CropEngine;
use crate::crop::region::AspectRatio;
use crate::export::encoder::{ExportArtifact, encode};
use crate::export::format::{ExportFormat, ExportRequest};
use crate::foundation::core::{PixelSize, Rect, Size};
use crate::foundation::error::{EditorError, EditorResult};
use crate::geometry::mapper::CoordinateMapper;
use crate::mask::circular::apply_circular_mask;
use crate::session::event::EditorEvent;
use crate::session::presets::{Preset, presets_for};
use image::RgbaImage;
use tracing::debug;

/// Options controlling session behavior.
#[derive(Clone, Copy, Debug)]
pub struct EditorSessionOpts {
    /// Enable the annotation layer (pen tools, erase, merge at export).
    ///
    /// Disabled sessions skip every pen-related event and never merge.
    pub annotations: bool,
    /// Fraction of each source axis covered by the auto-placed crop region.
    pub auto_region_fraction: f64,
    /// Pen state applied until the first `PenConfigChanged` event.
    pub pen: PenConfig,
}

impl Default for EditorSessionOpts {
    fn default() -> Self {
        Self {
            annotations: true,
            auto_region_fraction: 0.8,
            pen: PenConfig::default(),
        }
    }
}

/// Outcome of applying one event.
#[derive(Debug)]
pub enum EventOutcome {
    /// State advanced.
    Applied,
    /// The event lacked its precondition and was ignored.
    Skipped,
    /// An `ImageLoaded` payload could not be decoded; the session shows the
    /// placeholder state.
    RejectedInput,
    /// An export completed.
    Exported(ExportArtifact),
}

/// Advisory for the format selector while a circular crop is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatHint {
    /// The chosen format keeps the transparent background outside the circle.
    KeepsTransparency,
    /// The chosen format cannot represent alpha; a white square backdrop
    /// will be added.
    AddsWhiteBackground,
}

struct WorkingCanvas {
    buffer: RgbaImage,
    circular: bool,
    annotations: Option<AnnotationLayer>,
}

/// Explicit, caller-constructed editor session.
///
/// One session owns one editing lifecycle: the retained original, the
/// current source, the crop selection, and the working canvas with its
/// annotation layer. Sessions are independent; constructing several in
/// parallel is fine.
///
/// All state changes flow through [`EditorSession::apply`]. Precondition
/// violations (no image loaded, zero-area region, no working canvas) are
/// reported as [`EventOutcome::Skipped`] no-ops, never as panics or errors.
pub struct EditorSession {
    opts: EditorSessionOpts,
    original: Option<RgbaImage>,
    source: Option<RgbaImage>,
    crop: Option<CropEngine>,
    working: Option<WorkingCanvas>,
    display_box: Option<Size>,
    ratio: AspectRatio,
    circular: bool,
    pending_preset: Option<PixelSize>,
    tool: Option<Tool>,
    pen: PenConfig,
}

impl EditorSession {
    /// Construct a new session.
    pub fn new(opts: EditorSessionOpts) -> EditorResult<Self> {
        if !(opts.auto_region_fraction > 0.0 && opts.auto_region_fraction <= 1.0) {
            return Err(EditorError::validation(
                "auto_region_fraction must be in (0, 1]",
            ));
        }
        if opts.pen.width == 0 {
            return Err(EditorError::validation("pen width must be at least 1"));
        }
        Ok(Self {
            pen: opts.pen,
            opts,
            original: None,
            source: None,
            crop: None,
            working: None,
            display_box: None,
            ratio: AspectRatio::Free,
            circular: false,
            pending_preset: None,
            tool: None,
        })
    }

    /// Apply one event and report what happened.
    #[tracing::instrument(skip(self, event))]
    pub fn apply(&mut self, event: EditorEvent) -> EditorResult<EventOutcome> {
        match event {
            EditorEvent::ImageLoaded { bytes } => self.on_image_loaded(&bytes),
            EditorEvent::DisplayResized { width, height } => self.on_display_resized(width, height),
            EditorEvent::AspectRatioSelected { ratio } => self.on_aspect_ratio(ratio),
            EditorEvent::PresetSelected { width, height } => self.on_preset(width, height),
            EditorEvent::CircularToggled { circular } => {
                self.circular = circular;
                Ok(EventOutcome::Applied)
            }
            EditorEvent::CropRequested => self.on_crop(),
            EditorEvent::ToolSelected { tool } => self.on_tool(tool),
            EditorEvent::PenConfigChanged { color, width } => {
                if !self.opts.annotations || width == 0 {
                    return Ok(EventOutcome::Skipped);
                }
                self.pen = PenConfig { color, width };
                Ok(EventOutcome::Applied)
            }
            EditorEvent::PenPressed { at } => self.with_layer(|layer, tool, pen| {
                layer.pointer_pressed(tool, pen, at);
            }),
            EditorEvent::PenMoved { at } => self.with_layer(|layer, _, _| {
                layer.pointer_moved(at);
            }),
            EditorEvent::PenReleased { at } => self.with_layer(|layer, _, _| {
                layer.pointer_released(at);
            }),
            EditorEvent::EraseAllRequested => self.on_erase_all(),
            EditorEvent::ExportRequested { format } => self.on_export(format),
            EditorEvent::RevertRequested => self.on_revert(),
            EditorEvent::ClearRequested => self.on_clear(),
        }
    }

    fn on_image_loaded(&mut self, bytes: &[u8]) -> EditorResult<EventOutcome> {
        let decoded = match image::load_from_memory(bytes) {
            Ok(img) => img.to_rgba8(),
            Err(err) => {
                debug!(error = %err, "image payload rejected");
                // Placeholder state; the retained original stays revertable.
                self.source = None;
                self.crop = None;
                self.working = None;
                self.pending_preset = None;
                return Ok(EventOutcome::RejectedInput);
            }
        };
        self.original = Some(decoded.clone());
        self.install(decoded)?;
        Ok(EventOutcome::Applied)
    }

    fn on_display_resized(&mut self, width: f64, height: f64) -> EditorResult<EventOutcome> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Ok(EventOutcome::Skipped);
        }
        self.display_box = Some(Size::new(width, height));
        Ok(EventOutcome::Applied)
    }

    fn on_aspect_ratio(&mut self, ratio: AspectRatio) -> EditorResult<EventOutcome> {
        self.ratio = ratio;
        self.circular = ratio.is_circle();
        self.pending_preset = None;
        if let Some(crop) = &mut self.crop {
            crop.set_aspect_ratio(ratio);
        }
        Ok(EventOutcome::Applied)
    }

    fn on_preset(&mut self, width: u32, height: u32) -> EditorResult<EventOutcome> {
        let Some(crop) = &mut self.crop else {
            return Ok(EventOutcome::Skipped);
        };
        if width == 0 || height == 0 {
            return Ok(EventOutcome::Skipped);
        }
        crop.set_region_size(width, height)?;
        self.pending_preset = Some(PixelSize { width, height });
        Ok(EventOutcome::Applied)
    }

    fn on_crop(&mut self) -> EditorResult<EventOutcome> {
        let (Some(source), Some(crop)) = (&self.source, &self.crop) else {
            return Ok(EventOutcome::Skipped);
        };

        let extracted = match crop.extract_pixels(source, self.pending_preset) {
            Ok(buffer) => buffer,
            Err(EditorError::Precondition(reason)) => {
                debug!(%reason, "crop skipped");
                return Ok(EventOutcome::Skipped);
            }
            Err(err) => return Err(err),
        };
        let buffer = if self.circular {
            apply_circular_mask(&extracted, None)?
        } else {
            extracted
        };

        let display = self.fitted_display(PixelSize::of(&buffer));
        let annotations = if self.opts.annotations {
            Some(AnnotationLayer::new(display)?)
        } else {
            None
        };

        // The working canvas and its layer swap in together; the crop engine
        // is consumed by the crop, as the next selection starts from a fresh
        // image or a revert.
        self.working = Some(WorkingCanvas {
            buffer,
            circular: self.circular,
            annotations,
        });
        self.crop = None;
        self.pending_preset = None;
        Ok(EventOutcome::Applied)
    }

    fn on_tool(&mut self, tool: Option<Tool>) -> EditorResult<EventOutcome> {
        if !self.opts.annotations {
            return Ok(EventOutcome::Skipped);
        }
        if tool != self.tool
            && let Some(layer) = self.layer_mut()
        {
            layer.cancel_pending();
        }
        self.tool = tool;
        Ok(EventOutcome::Applied)
    }

    fn on_erase_all(&mut self) -> EditorResult<EventOutcome> {
        match self.layer_mut() {
            Some(layer) => {
                layer.erase_all();
                Ok(EventOutcome::Applied)
            }
            None => Ok(EventOutcome::Skipped),
        }
    }

    fn on_export(&mut self, format: ExportFormat) -> EditorResult<EventOutcome> {
        let Some(working) = &self.working else {
            return Ok(EventOutcome::Skipped);
        };
        let artifact = encode(
            &working.buffer,
            working.annotations.as_ref(),
            &ExportRequest {
                format,
                target: None,
            },
        )?;
        Ok(EventOutcome::Exported(artifact))
    }

    fn on_revert(&mut self) -> EditorResult<EventOutcome> {
        let Some(original) = self.original.clone() else {
            return Ok(EventOutcome::Skipped);
        };
        self.install(original)?;
        Ok(EventOutcome::Applied)
    }

    fn on_clear(&mut self) -> EditorResult<EventOutcome> {
        self.original = None;
        self.source = None;
        self.crop = None;
        self.working = None;
        self.ratio = AspectRatio::Free;
        self.circular = false;
        self.pending_preset = None;
        self.tool = None;
        self.pen = self.opts.pen;
        Ok(EventOutcome::Applied)
    }

    /// Swap in a new source buffer: fresh crop engine with the selected
    /// ratio, no working canvas, no pending preset.
    fn install(&mut self, buffer: RgbaImage) -> EditorResult<()> {
        let bounds = PixelSize::new(buffer.width(), buffer.height())
            .map_err(|_| EditorError::invalid_input("image has zero area"))?;
        self.crop = Some(CropEngine::new(
            bounds,
            self.ratio,
            self.opts.auto_region_fraction,
        )?);
        self.source = Some(buffer);
        self.working = None;
        self.pending_preset = None;
        Ok(())
    }

    fn with_layer(
        &mut self,
        f: impl FnOnce(&mut AnnotationLayer, Tool, PenConfig),
    ) -> EditorResult<EventOutcome> {
        let Some(tool) = self.tool else {
            return Ok(EventOutcome::Skipped);
        };
        let pen = self.pen;
        match self.layer_mut() {
            Some(layer) => {
                f(layer, tool, pen);
                Ok(EventOutcome::Applied)
            }
            None => Ok(EventOutcome::Skipped),
        }
    }

    fn layer_mut(&mut self) -> Option<&mut AnnotationLayer> {
        self.working.as_mut().and_then(|w| w.annotations.as_mut())
    }

    /// Aspect-fit `native` into the known display box, never upscaling.
    fn fitted_display(&self, native: PixelSize) -> PixelSize {
        let Some(display_box) = self.display_box else {
            return native;
        };
        let n = native.to_size();
        let scale = (display_box.width / n.width)
            .min(display_box.height / n.height)
            .min(1.0);
        PixelSize {
            width: ((n.width * scale).round() as u32).max(1),
            height: ((n.height * scale).round() as u32).max(1),
        }
    }

    // ---- projections -----------------------------------------------------

    /// Whether a decodable image is loaded.
    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Whether a crop has been applied and a working canvas exists.
    pub fn has_working(&self) -> bool {
        self.working.is_some()
    }

    /// Whether the circular mask is armed (or baked into the working canvas).
    pub fn is_circular(&self) -> bool {
        self.working
            .as_ref()
            .map(|w| w.circular)
            .unwrap_or(self.circular)
    }

    /// The decoded source buffer currently selected over, if any.
    pub fn source_buffer(&self) -> Option<&RgbaImage> {
        self.source.as_ref()
    }

    /// The post-crop (and post-mask) buffer, if a crop has been applied.
    pub fn working_buffer(&self) -> Option<&RgbaImage> {
        self.working.as_ref().map(|w| &w.buffer)
    }

    /// The working canvas's annotation layer, if present.
    pub fn annotation_layer(&self) -> Option<&AnnotationLayer> {
        self.working.as_ref().and_then(|w| w.annotations.as_ref())
    }

    /// Committed strokes for incremental rendering; empty without a layer.
    pub fn strokes(&self) -> &[Stroke] {
        self.annotation_layer()
            .map(|layer| layer.strokes())
            .unwrap_or(&[])
    }

    /// Current crop rectangle in native source coordinates.
    pub fn crop_rect_native(&self) -> Option<Rect> {
        self.crop.as_ref().map(|c| c.region().rect())
    }

    /// Current crop rectangle in display coordinates, for drag handles.
    ///
    /// Derived from the current geometry on every call; there is no cached
    /// mapper to go stale.
    pub fn crop_rect_display(&self) -> Option<Rect> {
        let crop = self.crop.as_ref()?;
        let bounds = crop.bounds();
        let shown = self.fitted_display(bounds);
        let mapper = CoordinateMapper::new(bounds, shown.to_size()).ok()?;
        Some(mapper.to_display_rect(crop.region().rect()))
    }

    /// Live dimension text: the working buffer's size after a crop, the
    /// region's rounded size during selection, `0 x 0` otherwise.
    pub fn dimension_label(&self) -> String {
        let size = self
            .working
            .as_ref()
            .map(|w| PixelSize::of(&w.buffer))
            .or_else(|| self.crop.as_ref().map(|c| c.region().pixel_size()));
        match size {
            Some(s) => format!("{} x {} px", s.width, s.height),
            None => "0 x 0 px".to_owned(),
        }
    }

    /// Preset resolutions for the active aspect ratio.
    pub fn preset_options(&self) -> &'static [Preset] {
        presets_for(self.ratio)
    }

    /// Advisory for the format selector; `None` unless a circular crop is
    /// armed or already applied.
    pub fn format_hint(&self, format: ExportFormat) -> Option<FormatHint> {
        if !self.is_circular() {
            return None;
        }
        Some(if format.supports_alpha() {
            FormatHint::KeepsTransparency
        } else {
            FormatHint::AddsWhiteBackground
        })
    }
}
