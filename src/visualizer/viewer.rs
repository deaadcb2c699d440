//! Window viewer for displaying rendered figures.

use image::RgbImage;
use minifb::{Key, Window, WindowOptions};

use crate::error::{PoseVizError, Result};

/// A simple figure viewer using minifb.
pub struct Viewer {
    window: Window,
    width: usize,
    height: usize,
    buffer: Vec<u32>,
}

impl Viewer {
    /// Create a new viewer window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be created.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| PoseVizError::VisualizerError(format!("Failed to create window: {e}")))?;

        // Limit update rate
        window.set_target_fps(60);

        Ok(Self {
            window,
            width,
            height,
            buffer: Vec::new(),
        })
    }

    /// Display a rasterized figure until the window is closed or Esc/Q is
    /// pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the window fails to update.
    pub fn show_until_closed(&mut self, image: &RgbImage) -> Result<()> {
        let (img_width, img_height) = (image.width() as usize, image.height() as usize);

        // Convert to the 0x00RRGGBB packing minifb expects.
        self.buffer.clear();
        self.buffer.reserve(img_width * img_height);
        for pixel in image.pixels() {
            let r = u32::from(pixel[0]);
            let g = u32::from(pixel[1]);
            let b = u32::from(pixel[2]);
            self.buffer.push((r << 16) | (g << 8) | b);
        }
        self.width = img_width;
        self.height = img_height;

        while self.window.is_open()
            && !self.window.is_key_down(Key::Escape)
            && !self.window.is_key_down(Key::Q)
        {
            self.window
                .update_with_buffer(&self.buffer, self.width, self.height)
                .map_err(|e| {
                    PoseVizError::VisualizerError(format!("Failed to update window: {e}"))
                })?;
        }
        Ok(())
    }
}
