use image::RgbImage;
use minifb::{Key, Window, WindowOptions};
use tracing::info;

use crate::error::Result;

/// Pack an RGB image into minifb's 0RGB pixel buffer
pub fn to_framebuffer(img: &RgbImage) -> Vec<u32> {
    img.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32) << 16) | ((g as u32) << 8) | b as u32
        })
        .collect()
}

/// Show the palette in a window until it is closed or Escape is pressed.
pub fn show_palette(img: &RgbImage, title: &str) -> Result<()> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let buffer = to_framebuffer(img);

    let mut window = Window::new(
        &format!("{} - Esc: Exit", title),
        width,
        height,
        WindowOptions {
            resize: true,
            scale: minifb::Scale::X1,
            scale_mode: minifb::ScaleMode::AspectRatioStretch,
            ..WindowOptions::default()
        },
    )?;

    // Static image; no need to spin faster
    window.set_target_fps(30);
    info!("Viewer opened ({}x{}). Press Esc or close the window to exit.", width, height);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window.update_with_buffer(&buffer, width, height)?;
    }

    Ok(())
}
