use crate::crop::region::AspectRatio;

/// A named fixed output resolution attached to an aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Preset {
    /// Display name shown in the preset selector.
    pub name: &'static str,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

const fn preset(name: &'static str, width: u32, height: u32) -> Preset {
    Preset {
        name,
        width,
        height,
    }
}

const WIDE: &[Preset] = &[
    preset("HD", 1280, 720),
    preset("FullHD", 1920, 1080),
    preset("2K", 2560, 1440),
    preset("4K", 3840, 2160),
];

const TALL: &[Preset] = &[
    preset("HD", 720, 1280),
    preset("FullHD", 1080, 1920),
    preset("2K", 1440, 2560),
    preset("4K", 2160, 3840),
];

const SQUARE: &[Preset] = &[preset("1K", 1000, 1000), preset("2K", 2000, 2000)];

const CIRCLE: &[Preset] = &[
    preset("100x100", 100, 100),
    preset("150x150", 150, 150),
    preset("250x250", 250, 250),
    preset("500x500", 500, 500),
    preset("600x600", 600, 600),
    preset("650x650", 650, 650),
    preset("1000x1000", 1000, 1000),
];

/// Preset resolutions offered for `ratio`. `Free` (and any unlisted ratio)
/// has none.
pub fn presets_for(ratio: AspectRatio) -> &'static [Preset] {
    match ratio {
        AspectRatio::Ratio { num: 16, den: 9 } => WIDE,
        AspectRatio::Ratio { num: 9, den: 16 } => TALL,
        AspectRatio::Ratio { num: 1, den: 1 } => SQUARE,
        AspectRatio::Circle => CIRCLE,
        _ => &[],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/presets.rs"]
mod tests;
