/// Raster export encoding into concrete image formats.
pub mod encoder;
/// Export format policy and request model.
pub mod format;
