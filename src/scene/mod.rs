pub mod primitives;

use assert2::assert;
use ordered_float::OrderedFloat;

use crate::camera::Camera;
use crate::color::Color;
use crate::geometry::{FloatType, HitRecord, Ray};
use crate::light::Light;
use crate::material::Material;
use crate::texture::Texture;

pub use primitives::Shape;

/// An opaque scene object: a shape with a material and an optional texture.
pub struct VisibleShape {
    pub shape: Shape,
    pub material: Material,
    pub texture: Option<Texture>,
}

impl VisibleShape {
    pub fn new(shape: Shape, material: Material) -> VisibleShape {
        VisibleShape {
            shape,
            material,
            texture: None,
        }
    }

    pub fn with_texture(shape: Shape, material: Material, texture: Texture) -> VisibleShape {
        VisibleShape {
            shape,
            material,
            texture: Some(texture),
        }
    }

    /// Nearest forward intersection, annotated with this object's material
    /// and texture.
    pub fn find_closest_intersection(&self, ray: &Ray) -> Option<OpaqueHit<'_>> {
        let hit = *self.shape.find_intersections(ray).first()?;
        Some(OpaqueHit {
            hit,
            material: &self.material,
            texture: self.texture.as_ref(),
        })
    }
}

/// A transparent scene object: contributes a blend color scaled by alpha
/// instead of being shaded.
pub struct TransparentShape {
    pub shape: Shape,
    pub color: Color,
    pub alpha: FloatType,
}

impl TransparentShape {
    pub fn new(shape: Shape, color: Color, alpha: FloatType) -> TransparentShape {
        assert!((0.0..=1.0).contains(&alpha));
        TransparentShape { shape, color, alpha }
    }
}

/// Nearest opaque hit along a ray.
#[derive(Copy, Clone)]
pub struct OpaqueHit<'a> {
    pub hit: HitRecord,
    pub material: &'a Material,
    pub texture: Option<&'a Texture>,
}

/// Nearest transparent hit along a ray; carries only what compositing needs.
#[derive(Copy, Clone, Debug)]
pub struct TransparentHit {
    pub t: FloatType,
    pub color: Color,
    pub alpha: FloatType,
}

/// A renderable scene. Owns the active camera and every shape and light for
/// its lifetime; the renderer only ever borrows it read-only, mutation
/// happens between render passes.
pub struct Scene {
    pub camera: Camera,
    pub opaque_objects: Vec<VisibleShape>,
    pub transparent_objects: Vec<TransparentShape>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(camera: Camera) -> Scene {
        Scene {
            camera,
            opaque_objects: Vec::new(),
            transparent_objects: Vec::new(),
            lights: Vec::new(),
        }
    }

    pub fn add_opaque_object(&mut self, object: VisibleShape) {
        self.opaque_objects.push(object);
    }

    pub fn add_transparent_object(&mut self, object: TransparentShape) {
        self.transparent_objects.push(object);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Replaces the active camera, typically once per frame from external
    /// input state.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }
}

/// Nearest opaque hit across the whole object list, or `None` if the ray
/// escapes. Exhaustive scan, no acceleration structure.
pub fn find_closest_opaque<'a>(ray: &Ray, objects: &'a [VisibleShape]) -> Option<OpaqueHit<'a>> {
    objects
        .iter()
        .filter_map(|object| object.find_closest_intersection(ray))
        .min_by_key(|candidate| OrderedFloat(candidate.hit.t))
}

/// Nearest transparent hit across the whole transparent list. Evaluated
/// independently of the opaque pass so a transparent surface can sit in
/// front of or behind an opaque one.
pub fn find_closest_transparent(ray: &Ray, objects: &[TransparentShape]) -> Option<TransparentHit> {
    objects
        .iter()
        .filter_map(|object| {
            let hit = object.shape.find_intersections(ray).first().copied()?;
            Some(TransparentHit {
                t: hit.t,
                color: object.color,
                alpha: object.alpha,
            })
        })
        .min_by_key(|candidate| OrderedFloat(candidate.t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{WorldPoint, WorldVector};
    use crate::material;
    use assert2::assert;

    fn sphere_at(x: FloatType) -> Shape {
        Shape::Sphere {
            center: WorldPoint::new(x, 0.0, 0.0),
            radius: 1.0,
        }
    }

    fn x_ray() -> Ray {
        Ray::new(WorldPoint::new(0.0, 0.0, 0.0), WorldVector::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn closest_opaque_picks_minimum_t() {
        let objects = vec![
            VisibleShape::new(sphere_at(10.0), material::gold()),
            VisibleShape::new(sphere_at(5.0), material::silver()),
            VisibleShape::new(sphere_at(20.0), material::ruby()),
        ];
        let hit = find_closest_opaque(&x_ray(), &objects).unwrap();
        assert!((hit.hit.t - 4.0).abs() < 1e-12);
        assert!(*hit.material == material::silver());
    }

    #[test]
    fn closest_opaque_none_when_all_miss() {
        let objects = vec![VisibleShape::new(sphere_at(-10.0), material::gold())];
        assert!(find_closest_opaque(&x_ray(), &objects).is_none());
    }

    #[test]
    fn transparent_pass_is_independent() {
        let transparent = vec![TransparentShape::new(
            sphere_at(3.0),
            crate::color::RED,
            0.25,
        )];
        let hit = find_closest_transparent(&x_ray(), &transparent).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-12);
        assert!(hit.alpha == 0.25);
        assert!(hit.color == crate::color::RED);
    }
}
