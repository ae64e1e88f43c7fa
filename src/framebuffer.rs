use assert2::assert;

use crate::color::{self, BLACK, Color};

/// A grid of [0, 1] RGB pixels the ray tracer renders into. Row 0 is the
/// bottom of the image, matching the camera's v-up pixel convention;
/// exporting flips rows into the image crate's top-down layout.
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Framebuffer {
        assert!(width > 0);
        assert!(height > 0);
        Framebuffer {
            width,
            height,
            pixels: vec![BLACK; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_color(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    pub fn get_color(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width);
        assert!(y < self.height);
        (y * self.width + x) as usize
    }

    /// Converts to an 8-bit image for saving or display.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            color::color_to_image(self.get_color(x, self.height - 1 - y))
        })
    }
}
