//! Rasterize the palette: a label column per wrapped row, then one outlined,
//! filled cell per patch with its name, color code and RGB values.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::color::{contrasting_color, parse_color_code, BACKGROUND, LABEL_TEXT, OUTLINE};
use crate::error::{PaletteError, Result};
use crate::font::TextRenderer;
use crate::layout::GridLayout;
use crate::patches::{BiomePatches, Patch};

/// Fill the inclusive rectangle (x0, y0)-(x1, y1) and draw a 1px outline on its edge.
/// Pixels outside the image are clipped.
pub fn draw_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, fill: Rgb<u8>, outline: Rgb<u8>) {
    let x_end = x1.min(img.width().saturating_sub(1));
    let y_end = y1.min(img.height().saturating_sub(1));
    if img.width() == 0 || img.height() == 0 || x0 > x_end || y0 > y_end {
        return;
    }

    for y in y0..=y_end {
        for x in x0..=x_end {
            let on_edge = x == x0 || x == x1 || y == y0 || y == y1;
            img.put_pixel(x, y, if on_edge { outline } else { fill });
        }
    }
}

/// Left edge of `text_w` pixels centered in `[x0, x0 + width)`.
/// Text wider than the span starts left of `x0` and spills over both sides.
fn centered_x(x0: u32, width: u32, text_w: u32) -> i32 {
    x0 as i32 + (width as i32 - text_w as i32).div_euclid(2)
}

/// Draw `text` centered horizontally in `[x0, x0 + width)` with its top at `y`.
fn draw_centered(font: &impl TextRenderer, img: &mut RgbImage, x0: u32, width: u32, y: u32, text: &str, color: Rgb<u8>) {
    let (text_w, _) = font.text_size(text);
    font.draw_text(img, centered_x(x0, width, text_w), y as i32, text, color);
}

/// Render all patches onto a new canvas sized by `layout`.
///
/// Fails on the first color code that is not `#RRGGBB`.
pub fn render_palette(patches: &BiomePatches, layout: &GridLayout, font: &impl TextRenderer) -> Result<RgbImage> {
    let mut img: RgbImage = ImageBuffer::from_pixel(layout.width(), layout.height(), BACKGROUND);

    let mut row = 0u32;
    for (biome_type, list) in patches {
        for r in 0..layout.rows_for(biome_type) {
            draw_label_cell(&mut img, layout, font, row, biome_type);

            for c in 0..layout.columns {
                let patch_index = r * layout.columns + c;
                let Some(patch) = list.get(patch_index) else {
                    break;
                };
                draw_patch_cell(&mut img, layout, font, row, c as u32, patch)?;
            }

            row += 1;
        }
    }

    Ok(img)
}

/// Label cell in the first column, biome type centered both ways
fn draw_label_cell(img: &mut RgbImage, layout: &GridLayout, font: &impl TextRenderer, row: u32, biome_type: &str) {
    let h = layout.patch_height;
    let y0 = row * h;
    draw_rect(img, 0, y0, layout.first_column_width, y0 + h, BACKGROUND, OUTLINE);

    let (_, text_h) = font.text_size(biome_type);
    let y = y0 + h.saturating_sub(text_h) / 2;
    draw_centered(font, img, 0, layout.first_column_width, y, biome_type, LABEL_TEXT);
}

/// Filled patch cell with three centered lines: name, color code, "R  G  B"
fn draw_patch_cell(
    img: &mut RgbImage,
    layout: &GridLayout,
    font: &impl TextRenderer,
    row: u32,
    column: u32,
    patch: &Patch,
) -> Result<()> {
    let rgb = parse_color_code(&patch.biome_color).ok_or_else(|| PaletteError::InvalidColor {
        biome: patch.biome_name.clone(),
        code: patch.biome_color.clone(),
    })?;

    let (w, h) = (layout.patch_width, layout.patch_height);
    let x0 = layout.first_column_width + column * w;
    let y0 = row * h;
    draw_rect(img, x0, y0, x0 + w, y0 + h, rgb, OUTLINE);

    let [r, g, b] = rgb.0;
    let lines = [
        patch.biome_name.clone(),
        patch.biome_color.clone(),
        format!("{}  {}  {}", r, g, b),
    ];

    let line_height = font.text_size(&lines[0]).1;
    let line_gap = line_height / 2;
    let total_text_height = 3 * line_height + 2 * line_gap;

    let text_color = contrasting_color(rgb);
    let mut text_y = y0 + h.saturating_sub(total_text_height) / 2;
    for line in &lines {
        draw_centered(font, img, x0, w, text_y, line, text_color);
        text_y += font.text_size(line).1 + line_gap;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BitmapFont;
    use std::path::Path;

    fn patch(name: &str, color: &str) -> Patch {
        Patch {
            biome_name: name.to_string(),
            biome_color: color.to_string(),
        }
    }

    fn two_types() -> BiomePatches {
        let mut patches = BiomePatches::new();
        patches.insert("Desert".to_string(), vec![
            patch("Dunes", "#EEDD88"),
            patch("Dunes", "#CCBB66"),
            patch("Dunes", "#AA9944"),
        ]);
        patches.insert("Forest".to_string(), vec![patch("Birch", "#00CC00"), patch("Pine", "#003300")]);
        patches
    }

    #[test]
    fn test_draw_rect_fill_and_outline() {
        let mut img = RgbImage::from_pixel(6, 6, Rgb([1, 1, 1]));
        draw_rect(&mut img, 1, 1, 4, 4, Rgb([200, 0, 0]), Rgb([0, 0, 0]));

        assert_eq!(*img.get_pixel(0, 0), Rgb([1, 1, 1]));
        assert_eq!(*img.get_pixel(1, 1), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(4, 4), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(4, 2), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(2, 2), Rgb([200, 0, 0]));
        assert_eq!(*img.get_pixel(3, 3), Rgb([200, 0, 0]));
        assert_eq!(*img.get_pixel(5, 5), Rgb([1, 1, 1]));
    }

    #[test]
    fn test_draw_rect_clips() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([1, 1, 1]));
        draw_rect(&mut img, 2, 2, 10, 10, Rgb([9, 9, 9]), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(2, 2), Rgb([0, 0, 0]));
        assert_eq!(*img.get_pixel(3, 3), Rgb([9, 9, 9]));
    }

    #[test]
    fn test_render_dimensions_and_cells() {
        let patches = two_types();
        let font = BitmapFont::new(2);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();
        let img = render_palette(&patches, &layout, &font).unwrap();

        assert_eq!(img.dimensions(), (layout.width(), layout.height()));
        assert_eq!(img.height(), 1 + 2 * layout.patch_height);

        let fw = layout.first_column_width;
        let (w, h) = (layout.patch_width, layout.patch_height);

        // Top-left pixel of the first patch of "Desert" (row 0) is interior fill
        assert_eq!(*img.get_pixel(fw + 1, 1), Rgb([0xEE, 0xDD, 0x88]));
        // Second "Desert" patch
        assert_eq!(*img.get_pixel(fw + w + 1, 1), Rgb([0xCC, 0xBB, 0x66]));
        // "Forest" on row 1: Birch then Pine
        assert_eq!(*img.get_pixel(fw + 1, h + 1), Rgb([0x00, 0xCC, 0x00]));
        assert_eq!(*img.get_pixel(fw + w + 1, h + 1), Rgb([0x00, 0x33, 0x00]));
        // Third column of "Forest" is not drawn
        assert_eq!(*img.get_pixel(fw + 2 * w + 2, h + 2), BACKGROUND);
        // Cell edges are outlined
        assert_eq!(*img.get_pixel(fw, 5), OUTLINE);
        assert_eq!(*img.get_pixel(0, h), OUTLINE);
        // Label column interior keeps the background color
        assert_eq!(*img.get_pixel(1, 1), BACKGROUND);
    }

    #[test]
    fn test_patch_text_uses_contrasting_color() {
        let mut patches = BiomePatches::new();
        patches.insert("Dark".to_string(), vec![patch("Night", "#000000")]);
        let font = BitmapFont::new(1);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();
        let img = render_palette(&patches, &layout, &font).unwrap();

        let fw = layout.first_column_width;
        let white = (fw + 1..fw + layout.patch_width)
            .flat_map(|x| (1..layout.patch_height).map(move |y| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) == Rgb([255, 255, 255]))
            .count();
        assert!(white > 0);
    }

    /// Bounding box (x_min, y_min, x_max, y_max) of `color` pixels inside a cell interior
    fn color_bounds(img: &RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in y0 + 1..y0 + h {
            for x in x0 + 1..x0 + w {
                if *img.get_pixel(x, y) != color {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x_min, y_min, x_max, y_max)) => (x_min.min(x), y_min.min(y), x_max.max(x), y_max.max(y)),
                });
            }
        }
        bounds
    }

    #[test]
    fn test_patch_text_lines_stacked_and_centered() {
        // "WWWWWWWWWWWWW" is as wide as "255  255  255" (13 glyphs), so every
        // line starts at the same x and the glyph ink fills each line box
        let mut patches = BiomePatches::new();
        patches.insert("Snow".to_string(), vec![patch("WWWWWWWWWWWWW", "#FFFFFF")]);
        let font = BitmapFont::new(1);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();
        let img = render_palette(&patches, &layout, &font).unwrap();

        let (x0, y0) = (layout.first_column_width, 0);
        let (w, h) = (layout.patch_width, layout.patch_height);
        let lh = font.line_height();
        assert_eq!(lh, 7);

        // Light patch: black text
        let black = Rgb([0, 0, 0]);
        let (x_min, y_min, _, y_max) = color_bounds(&img, x0, y0, w, h, black).unwrap();

        let block = 3 * lh + 2 * (lh / 2);
        let first_top = y0 + (h - block) / 2;
        assert_eq!(y_min, first_top);

        // Third line "255  255  255" starts two lines and two gaps lower; its
        // bottom row is the last inked row of the block
        let third_top = first_top + 2 * (lh + lh / 2);
        assert_eq!(y_max, third_top + lh - 1);
        // '2' has ink in its left column on its second glyph row
        assert_eq!(*img.get_pixel(x_min, third_top + 1), black);

        let text_w = font.text_size("255  255  255").0;
        assert_eq!(x_min, x0 + (w - text_w) / 2);

        // Nothing inked in the gap between the first and second lines
        let gap_top = first_top + lh;
        for y in gap_top..gap_top + lh / 2 {
            for x in x0 + 1..x0 + w {
                assert_ne!(*img.get_pixel(x, y), black, "gap pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_dark_patch_text_is_white_and_centered() {
        let mut patches = BiomePatches::new();
        patches.insert("Dark".to_string(), vec![patch("WWWWWWWWWWWWW", "#101010")]);
        let font = BitmapFont::new(1);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();
        let img = render_palette(&patches, &layout, &font).unwrap();

        let (x0, w, h) = (layout.first_column_width, layout.patch_width, layout.patch_height);
        let lh = font.line_height();
        let (x_min, y_min, _, _) = color_bounds(&img, x0, 0, w, h, LABEL_TEXT).unwrap();
        assert_eq!(y_min, (h - (3 * lh + 2 * (lh / 2))) / 2);
        assert_eq!(x_min, x0 + (w - font.text_size("WWWWWWWWWWWWW").0) / 2);
        assert!(color_bounds(&img, x0, 0, w, h, Rgb([0, 0, 0])).is_none());
    }

    #[test]
    fn test_wide_line_spills_both_sides() {
        // "Oak" sizes the cell narrower than its "255  255  255" line
        let mut patches = BiomePatches::new();
        patches.insert("Forest".to_string(), vec![patch("Oak", "#FFFFFF")]);
        let font = BitmapFont::new(1);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();

        let text_w = font.text_size("255  255  255").0;
        assert!(text_w > layout.patch_width);

        let x0 = layout.first_column_width;
        let x = centered_x(x0, layout.patch_width, text_w);
        assert!(x < x0 as i32);
        let right = x + text_w as i32;
        assert_eq!(x0 as i32 - x, right - (x0 + layout.patch_width) as i32);
        assert_eq!(centered_x(10, 20, 6), 17);
        assert_eq!(centered_x(10, 20, 30), 5);
    }

    #[test]
    fn test_wrapped_rows_repeat_label() {
        let mut patches = BiomePatches::new();
        let list: Vec<Patch> = (0..10).map(|i| patch(&format!("B{}", i), "#FFFFFF")).collect();
        patches.insert("Snow".to_string(), list);
        let font = BitmapFont::new(1);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();

        // 10 patches -> cube root 3 -> 9 columns, 2 rows
        assert_eq!(layout.columns, 9);
        assert_eq!(layout.rows, 2);

        let img = render_palette(&patches, &layout, &font).unwrap();
        let h = layout.patch_height;
        let label_pixels = |row: u32| {
            (1..layout.first_column_width)
                .flat_map(|x| (row * h + 1..(row + 1) * h).map(move |y| (x, y)))
                .filter(|&(x, y)| *img.get_pixel(x, y) == LABEL_TEXT)
                .count()
        };
        assert!(label_pixels(0) > 0);
        assert_eq!(label_pixels(0), label_pixels(1));

        // Only the first cell of the second row is filled
        let fw = layout.first_column_width;
        assert_eq!(*img.get_pixel(fw + 1, h + 1), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(fw + layout.patch_width + 2, h + 2), BACKGROUND);
    }

    #[test]
    fn test_invalid_color_fails() {
        let mut patches = BiomePatches::new();
        patches.insert("Bad".to_string(), vec![patch("Oops", "#XYZXYZ")]);
        let font = BitmapFont::new(1);
        let layout = GridLayout::plan(&patches, &font, Path::new(".")).unwrap();

        let err = render_palette(&patches, &layout, &font).unwrap_err();
        match err {
            PaletteError::InvalidColor { biome, code } => {
                assert_eq!(biome, "Oops");
                assert_eq!(code, "#XYZXYZ");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
