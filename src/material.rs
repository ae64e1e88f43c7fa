use crate::color::Color;
use crate::geometry::FloatType;

/// Phong material: per-channel ambient/diffuse/specular reflectances plus a
/// shininess exponent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: FloatType,
}

impl Material {
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: FloatType) -> Material {
        Material {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// A matte material with the given base color and no specular highlight.
    pub fn matte(color: Color) -> Material {
        Material::new(color * 0.2, color, Color::new(0.0, 0.0, 0.0), 1.0)
    }
}

// Stock materials, values from the classic OpenGL material table.

pub fn pewter() -> Material {
    Material::new(
        Color::new(0.105882, 0.058824, 0.113725),
        Color::new(0.427451, 0.470588, 0.541176),
        Color::new(0.333333, 0.333333, 0.521569),
        9.84615,
    )
}

/// The table has no separate tin entry; scenes that ask for tin get pewter.
pub fn tin() -> Material {
    pewter()
}

pub fn gold() -> Material {
    Material::new(
        Color::new(0.24725, 0.1995, 0.0745),
        Color::new(0.75164, 0.60648, 0.22648),
        Color::new(0.628281, 0.555802, 0.366065),
        51.2,
    )
}

pub fn silver() -> Material {
    Material::new(
        Color::new(0.19225, 0.19225, 0.19225),
        Color::new(0.50754, 0.50754, 0.50754),
        Color::new(0.508273, 0.508273, 0.508273),
        51.2,
    )
}

pub fn polished_silver() -> Material {
    Material::new(
        Color::new(0.23125, 0.23125, 0.23125),
        Color::new(0.2775, 0.2775, 0.2775),
        Color::new(0.773911, 0.773911, 0.773911),
        89.6,
    )
}

pub fn bronze() -> Material {
    Material::new(
        Color::new(0.2125, 0.1275, 0.054),
        Color::new(0.714, 0.4284, 0.18144),
        Color::new(0.393548, 0.271906, 0.166721),
        25.6,
    )
}

pub fn brass() -> Material {
    Material::new(
        Color::new(0.329412, 0.223529, 0.027451),
        Color::new(0.780392, 0.568627, 0.113725),
        Color::new(0.992157, 0.941176, 0.807843),
        27.8974,
    )
}

pub fn ruby() -> Material {
    Material::new(
        Color::new(0.1745, 0.01175, 0.01175),
        Color::new(0.61424, 0.04136, 0.04136),
        Color::new(0.727811, 0.626959, 0.626959),
        76.8,
    )
}

pub fn red_plastic() -> Material {
    Material::new(
        Color::new(0.0, 0.0, 0.0),
        Color::new(0.5, 0.0, 0.0),
        Color::new(0.7, 0.6, 0.6),
        32.0,
    )
}

pub fn cyan_plastic() -> Material {
    Material::new(
        Color::new(0.0, 0.1, 0.06),
        Color::new(0.0, 0.509804, 0.509804),
        Color::new(0.501961, 0.501961, 0.501961),
        32.0,
    )
}
