//! Biome color codes: normalization, RGB resolution and label contrast.

use image::Rgb;

/// Palette background and label cell fill (#404040)
pub const BACKGROUND: Rgb<u8> = Rgb([0x40, 0x40, 0x40]);
/// Cell outline color
pub const OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);
/// Label text color
pub const LABEL_TEXT: Rgb<u8> = Rgb([255, 255, 255]);

/// Luminance below which light text is used
const CONTRAST_THRESHOLD: u32 = 123;

/// Ensure a color code starts with '#'. Some biome files omit it.
///
/// Hex digits are not checked here; bad codes fail later in [`parse_color_code`].
pub fn color_code(code: &str) -> String {
    if code.starts_with('#') {
        code.to_string()
    } else {
        format!("#{}", code)
    }
}

/// Resolve a `#RRGGBB` code to an RGB triple.
pub fn parse_color_code(code: &str) -> Option<Rgb<u8>> {
    let hex = code.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Perceived brightness on a 0-255 scale (ITU-R BT.601 weights).
pub fn luminance(rgb: Rgb<u8>) -> u32 {
    let [r, g, b] = rgb.0;
    (r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000
}

/// Text color that stays readable on top of `rgb`: white on dark, black on light.
pub fn contrasting_color(rgb: Rgb<u8>) -> Rgb<u8> {
    if luminance(rgb) < CONTRAST_THRESHOLD {
        Rgb([255, 255, 255])
    } else {
        Rgb([0, 0, 0])
    }
}

/// Format a color as lowercase `#rrggbb`.
pub fn to_hex(rgb: Rgb<u8>) -> String {
    let [r, g, b] = rgb.0;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}
