/// Annotation layer compositing pen strokes over a raster surface.
pub mod layer;
/// Pen stroke model: tools, configuration and stroke geometry.
pub mod stroke;
