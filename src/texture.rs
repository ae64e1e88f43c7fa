use assert2::assert;

use crate::color::Color;
use crate::geometry::FloatType;

const BYTES_PER_PIXEL: u32 = 3; // RGB

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture data holds {actual} bytes, {width}x{height} RGB needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("texture dimensions must be non-zero, got {width}x{height}")]
    EmptyTexture { width: u32, height: u32 },
}

/// An RGB image sampled by surface UV coordinates. Row 0 is the bottom of
/// the image, matching the framebuffer's v-up convention.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Texture {
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Texture, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyTexture { width, height });
        }
        let expected = (width * height * BYTES_PER_PIXEL) as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Texture {
            width,
            height,
            data,
        })
    }

    pub fn from_image(img: &image::RgbImage) -> Result<Texture, TextureError> {
        let (width, height) = img.dimensions();
        let mut data = Vec::with_capacity((width * height * BYTES_PER_PIXEL) as usize);
        // Image rows come top-down, texture rows are stored bottom-up.
        for y in (0..height).rev() {
            for x in 0..width {
                data.extend_from_slice(&img.get_pixel(x, y).0);
            }
        }
        Texture::from_raw(width, height, data)
    }

    /// Procedural checkerboard of `cell`-sized squares alternating between
    /// two colors.
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: Color, b: Color) -> Texture {
        assert!(width > 0 && height > 0);
        let cell = cell.max(1);
        let mut data = Vec::with_capacity((width * height * BYTES_PER_PIXEL) as usize);
        for y in 0..height {
            for x in 0..width {
                let color = if (x / cell + y / cell) % 2 == 0 { a } else { b };
                let pixel = crate::color::color_to_image(color);
                data.extend_from_slice(&pixel.0);
            }
        }
        Texture {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-pixel sample at (u, v). Coordinates wrap, so values outside
    /// [0, 1] tile the texture.
    pub fn get_pixel_uv(&self, u: FloatType, v: FloatType) -> Color {
        let u = Self::wrap(u);
        let v = Self::wrap(v);
        let x = ((u * (self.width - 1) as FloatType).round() as u32).min(self.width - 1);
        let y = ((v * (self.height - 1) as FloatType).round() as u32).min(self.height - 1);
        let index = ((y * self.width + x) * BYTES_PER_PIXEL) as usize;
        Color::new(
            self.data[index] as FloatType / 255.0,
            self.data[index + 1] as FloatType / 255.0,
            self.data[index + 2] as FloatType / 255.0,
        )
    }

    // Wraps into [0, 1], keeping 1.0 itself addressable as the far edge.
    fn wrap(coord: FloatType) -> FloatType {
        if (0.0..=1.0).contains(&coord) {
            coord
        } else {
            coord.rem_euclid(1.0)
        }
    }
}
