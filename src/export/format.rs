use crate::foundation::core::PixelSize;
use crate::foundation::error::EditorError;

/// Supported export formats.
///
/// Wire tokens are the lowercase variant names: `png`, `jpg`, `webp`, `gif`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossless RGBA.
    Png,
    /// Lossy, opaque only; encoded at the fixed quality factor.
    Jpg,
    /// Lossless RGBA (the runtime encoder does not do lossy WebP).
    Webp,
    /// Indexed with 1-bit transparency.
    Gif,
}

impl ExportFormat {
    /// MIME type for download links.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }

    /// Whether the format can represent transparency at all.
    ///
    /// GIF counts: its 1-bit transparency is preferred over a backdrop fill.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpg)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, EditorError> {
        match s {
            "png" => Ok(Self::Png),
            "jpg" => Ok(Self::Jpg),
            "webp" => Ok(Self::Webp),
            "gif" => Ok(Self::Gif),
            _ => Err(EditorError::invalid_input(format!(
                "unknown export format '{s}'"
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// JPEG quality on the encoder's 0..=100 scale (the fixed 0.9 factor).
pub(crate) const JPEG_QUALITY: u8 = 90;

/// Alpha threshold below which a pixel becomes fully transparent in GIF
/// output (GIF transparency is 1-bit).
pub(crate) const GIF_ALPHA_THRESHOLD: u8 = 128;

/// One export invocation.
///
/// `target`, when set, must already be reflected by the working buffer;
/// resampling happens at crop time, not at encode time.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ExportRequest {
    /// Requested raster format.
    pub format: ExportFormat,
    /// Expected output dimensions, when a preset drove the crop.
    #[serde(default)]
    pub target: Option<PixelSize>,
}

#[cfg(test)]
#[path = "../../tests/unit/export/format.rs"]
mod tests;
