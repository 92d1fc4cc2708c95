/// Circular mask application over a raster surface.
pub mod circular;
