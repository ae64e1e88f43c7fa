use crate::geometry::FloatType;

pub type Color = rgb::RGB<FloatType>;

pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };
pub const PALE_GREEN: Color = Color { r: 0.596, g: 0.984, b: 0.596 };

/// Componentwise product, used to modulate a light color by a material
/// reflectance triple.
pub fn modulate(a: Color, b: Color) -> Color {
    Color::new(a.r * b.r, a.g * b.g, a.b * b.b)
}

/// Clamps every channel into [0, 1].
pub fn clamp01(c: Color) -> Color {
    Color::new(c.r.clamp(0.0, 1.0), c.g.clamp(0.0, 1.0), c.b.clamp(0.0, 1.0))
}

/// Maps a 0-1 color to a pixel type compatible with module image.
pub fn color_to_image(color: Color) -> image::Rgb<u8> {
    image::Rgb([
        (color.r * 255.0).round().clamp(0.0, 255.0) as u8,
        (color.g * 255.0).round().clamp(0.0, 255.0) as u8,
        (color.b * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    #[test]
    fn modulate_is_componentwise() {
        let c = modulate(Color::new(0.5, 1.0, 0.25), Color::new(0.4, 0.5, 0.0));
        assert!(c == Color::new(0.2, 0.5, 0.0));
    }

    #[test]
    fn clamp_pins_out_of_range_channels() {
        let c = clamp01(Color::new(1.7, -0.3, 0.5));
        assert!(c.r == 1.0);
        assert!(c.g == 0.0);
        assert!(c.b == 0.5);
    }

    #[test]
    fn color_to_image_rounds() {
        assert!(color_to_image(WHITE) == image::Rgb([255, 255, 255]));
        assert!(color_to_image(Color::new(0.5, 0.0, 2.0)) == image::Rgb([128, 0, 255]));
    }
}
