use crate::annotate::stroke::{PenConfig, Stroke, StrokeKind, Tool};
use crate::foundation::compose;
use crate::foundation::core::{PixelSize, Point, Rgba8};
use crate::foundation::error::{EditorError, EditorResult};
use image::{Rgba, RgbaImage};
use smallvec::SmallVec;
use tiny_skia::{
    Color, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint,
    Stroke as SkStroke, Transform,
};

enum PendingStroke {
    Freehand { stroke: Stroke },
    Straight { anchor: Point, pen: PenConfig },
}

/// Append-only drawing surface authored at display resolution.
///
/// Two surfaces back the layer: the persistent one receiving committed
/// stroke pixels, and a transient preview used only while a straight-line
/// drag is in flight. The preview is never merged anywhere; it is redrawn
/// from scratch on every pointer move and cleared on release or cancel.
pub struct AnnotationLayer {
    size: PixelSize,
    committed: Pixmap,
    preview: Pixmap,
    strokes: Vec<Stroke>,
    pending: Option<PendingStroke>,
    last_in_bounds: Option<Point>,
}

impl AnnotationLayer {
    /// Create an empty layer matching the displayed image dimensions.
    pub fn new(size: PixelSize) -> EditorResult<Self> {
        let committed = Pixmap::new(size.width, size.height).ok_or_else(|| {
            EditorError::validation("annotation surface dimensions are out of range")
        })?;
        let preview = committed.clone();
        Ok(Self {
            size,
            committed,
            preview,
            strokes: Vec::new(),
            pending: None,
            last_in_bounds: None,
        })
    }

    /// Display dimensions the layer was authored at.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Begin a stroke at `at` with the given tool and pen.
    ///
    /// Freehand starts accumulating immediately; straight records the anchor
    /// only and renders nothing until the first move.
    pub fn pointer_pressed(&mut self, tool: Tool, pen: PenConfig, at: Point) {
        self.cancel_pending();
        self.note_position(at);
        match tool {
            Tool::Freehand => {
                let mut points = SmallVec::new();
                points.push(at);
                self.pending = Some(PendingStroke::Freehand {
                    stroke: Stroke {
                        kind: StrokeKind::Freehand,
                        color: pen.color,
                        width: pen.width,
                        points,
                    },
                });
            }
            Tool::Straight => {
                self.pending = Some(PendingStroke::Straight { anchor: at, pen });
            }
        }
    }

    /// Extend the in-flight stroke to `at`.
    ///
    /// Freehand commits the new segment onto the persistent surface right
    /// away; straight redraws the transient preview from its anchor.
    pub fn pointer_moved(&mut self, at: Point) {
        self.note_position(at);
        match &mut self.pending {
            Some(PendingStroke::Freehand { stroke }) => {
                if let Some(&prev) = stroke.points.last() {
                    draw_segment(&mut self.committed, prev, at, stroke.color, stroke.width);
                }
                stroke.points.push(at);
            }
            Some(PendingStroke::Straight { anchor, pen }) => {
                let (anchor, pen) = (*anchor, *pen);
                self.preview.fill(Color::TRANSPARENT);
                draw_segment(&mut self.preview, anchor, at, pen.color, pen.width);
            }
            None => {}
        }
    }

    /// Finish the in-flight stroke.
    ///
    /// A straight stroke commits exactly one segment from its anchor to the
    /// release point; a release outside the canvas (or a `None` position)
    /// falls back to the last known in-bounds point. A freehand press with no
    /// movement commits a single dot.
    pub fn pointer_released(&mut self, at: Option<Point>) {
        if let Some(p) = at {
            self.note_position(p);
        }
        match self.pending.take() {
            Some(PendingStroke::Freehand { stroke }) => {
                if stroke.points.len() == 1 {
                    if let Some(&p) = stroke.points.first() {
                        draw_dot(&mut self.committed, p, stroke.color, stroke.width);
                    }
                }
                self.strokes.push(stroke);
            }
            Some(PendingStroke::Straight { anchor, pen }) => {
                self.preview.fill(Color::TRANSPARENT);
                let end = at
                    .filter(|p| self.contains(*p))
                    .or(self.last_in_bounds)
                    .unwrap_or(anchor);
                draw_segment(&mut self.committed, anchor, end, pen.color, pen.width);
                let mut points = SmallVec::new();
                points.push(anchor);
                points.push(end);
                self.strokes.push(Stroke {
                    kind: StrokeKind::Straight,
                    color: pen.color,
                    width: pen.width,
                    points,
                });
            }
            None => {}
        }
    }

    /// Discard an in-flight stroke without committing its preview.
    ///
    /// A partially drawn freehand stroke keeps its already-committed pixels;
    /// its record is preserved so the stroke list stays consistent with the
    /// surface.
    pub fn cancel_pending(&mut self) {
        match self.pending.take() {
            Some(PendingStroke::Freehand { stroke }) => {
                if stroke.points.len() > 1 {
                    self.strokes.push(stroke);
                }
            }
            Some(PendingStroke::Straight { .. }) => {
                self.preview.fill(Color::TRANSPARENT);
            }
            None => {}
        }
    }

    /// Clear both the persistent and preview surfaces unconditionally.
    pub fn erase_all(&mut self) {
        self.committed.fill(Color::TRANSPARENT);
        self.preview.fill(Color::TRANSPARENT);
        self.strokes.clear();
        self.pending = None;
    }

    /// Whether any persistent pixel has non-zero alpha.
    pub fn has_content(&self) -> bool {
        self.committed.pixels().iter().any(|p| p.alpha() != 0)
    }

    /// Committed strokes, in commit order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Raw premultiplied RGBA8 bytes of the persistent surface.
    pub fn committed_rgba(&self) -> &[u8] {
        self.committed.data()
    }

    /// Raw premultiplied RGBA8 bytes of the live preview surface.
    pub fn preview_rgba(&self) -> &[u8] {
        self.preview.data()
    }

    /// Scale the persistent surface to `target`'s dimensions (independently
    /// per axis, bilinear) and composite it source-over, in place.
    pub fn flatten_onto(&self, target: &mut RgbaImage) -> EditorResult<()> {
        let (tw, th) = target.dimensions();
        if tw == 0 || th == 0 {
            return Err(EditorError::validation(
                "flatten target must be non-empty",
            ));
        }

        let scaled;
        let src = if (tw, th) == (self.size.width, self.size.height) {
            &self.committed
        } else {
            let mut pm = Pixmap::new(tw, th).ok_or_else(|| {
                EditorError::validation("flatten target dimensions are out of range")
            })?;
            let sx = tw as f32 / self.size.width as f32;
            let sy = th as f32 / self.size.height as f32;
            pm.draw_pixmap(
                0,
                0,
                self.committed.as_ref(),
                &PixmapPaint {
                    quality: FilterQuality::Bilinear,
                    ..PixmapPaint::default()
                },
                Transform::from_scale(sx, sy),
                None,
            );
            scaled = pm;
            &scaled
        };

        for (dst, px) in target.pixels_mut().zip(src.pixels().iter()) {
            if px.alpha() == 0 {
                continue;
            }
            let d = compose::premultiply(Rgba8 {
                r: dst[0],
                g: dst[1],
                b: dst[2],
                a: dst[3],
            });
            let out = compose::over(d, [px.red(), px.green(), px.blue(), px.alpha()]);
            let s = compose::demultiply(out);
            *dst = Rgba([s.r, s.g, s.b, s.a]);
        }
        Ok(())
    }

    fn contains(&self, p: Point) -> bool {
        p.x >= 0.0
            && p.y >= 0.0
            && p.x < f64::from(self.size.width)
            && p.y < f64::from(self.size.height)
    }

    fn note_position(&mut self, p: Point) {
        if self.contains(p) {
            self.last_in_bounds = Some(p);
        }
    }
}

fn draw_segment(surface: &mut Pixmap, from: Point, to: Point, color: Rgba8, width: u32) {
    if from == to {
        draw_dot(surface, from, color, width);
        return;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    let stroke = SkStroke {
        width: width.max(1) as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..SkStroke::default()
    };
    surface.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn draw_dot(surface: &mut Pixmap, at: Point, color: Rgba8, width: u32) {
    let mut pb = PathBuilder::new();
    pb.push_circle(at.x as f32, at.y as f32, width.max(1) as f32 / 2.0);
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;

    surface.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

#[cfg(test)]
#[path = "../../tests/unit/annotate/layer.rs"]
mod tests;
