//! Phong lighting: pure shading functions plus the two light variants.
//!
//! All colors are accumulated unclamped; the renderer clamps once per pixel.

use nalgebra::Unit;

use crate::camera::Frame;
use crate::color::{self, BLACK, Color};
use crate::geometry::{EPSILON, FloatType, Ray, UnitVector, WorldPoint, WorldVector};
use crate::material::Material;
use crate::scene::VisibleShape;

/// Distance falloff coefficients: `1 / (constant + linear·d + quadratic·d²)`.
#[derive(Copy, Clone, Debug)]
pub struct AttenuationParams {
    pub constant: FloatType,
    pub linear: FloatType,
    pub quadratic: FloatType,
}

impl Default for AttenuationParams {
    fn default() -> Self {
        AttenuationParams {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

impl AttenuationParams {
    /// Attenuation factor at distance `d`. An all-zero parameter set would
    /// divide by zero; it is guarded to mean "no attenuation".
    pub fn factor(&self, distance: FloatType) -> FloatType {
        let denominator =
            self.constant + self.linear * distance + self.quadratic * distance * distance;
        if denominator <= EPSILON {
            1.0
        } else {
            1.0 / denominator
        }
    }
}

/// Ambient term: light color modulated by the material's ambient reflectance.
pub fn ambient_color(mat_ambient: Color, light_color: Color) -> Color {
    color::modulate(light_color, mat_ambient)
}

/// Diffuse term, scaled by the Lambert cosine `max(0, l·n)`.
pub fn diffuse_color(
    mat_diffuse: Color,
    light_color: Color,
    l: &UnitVector,
    n: &UnitVector,
) -> Color {
    color::modulate(light_color, mat_diffuse) * l.dot(n).max(0.0)
}

/// Specular term, scaled by `max(0, r·v)^shininess` where `r` is the light
/// vector reflected about the normal.
pub fn specular_color(
    mat_specular: Color,
    light_color: Color,
    shininess: FloatType,
    r: &UnitVector,
    v: &UnitVector,
) -> Color {
    color::modulate(light_color, mat_specular) * r.dot(v).max(0.0).powf(shininess)
}

/// Full Phong contribution of one light at one point:
/// `ambient + attenuation·(diffuse + specular)`.
pub fn total_color(
    material: &Material,
    light_color: Color,
    v: &UnitVector,
    n: &UnitVector,
    light_pos: &WorldPoint,
    intersection_pt: &WorldPoint,
    attenuation_on: bool,
    at_params: &AttenuationParams,
) -> Color {
    let to_light = light_pos - intersection_pt;
    let distance = to_light.norm();
    let l = Unit::new_normalize(to_light);
    let r = Unit::new_normalize(n.as_ref() * (2.0 * l.dot(n)) - l.as_ref());

    let ambient = ambient_color(material.ambient, light_color);
    let diffuse = diffuse_color(material.diffuse, light_color, &l, n);
    let specular = specular_color(material.specular, light_color, material.shininess, &r, v);

    let attenuation = if attenuation_on {
        at_params.factor(distance)
    } else {
        1.0
    };

    ambient + (diffuse + specular) * attenuation
}

#[derive(Clone, Debug)]
pub struct PositionalLight {
    pub pos: WorldPoint,
    pub color: Color,
    pub is_on: bool,
    pub attenuation_on: bool,
    pub at_params: AttenuationParams,
    /// World-fixed position when true; interpreted relative to the camera
    /// frame when false.
    pub tied_to_world: bool,
}

impl PositionalLight {
    pub fn new(pos: WorldPoint, color: Color) -> PositionalLight {
        PositionalLight {
            pos,
            color,
            is_on: true,
            attenuation_on: false,
            at_params: AttenuationParams::default(),
            tied_to_world: true,
        }
    }

    /// The light's position in world coordinates, resolving camera-relative
    /// placement through the eye frame.
    pub fn actual_position(&self, eye_frame: &Frame) -> WorldPoint {
        if self.tied_to_world {
            self.pos
        } else {
            eye_frame.to_world_coords(&self.pos.coords)
        }
    }

    /// Color this light produces at an intercept point. Black when off,
    /// ambient-only when the point is shadowed.
    pub fn illuminate(
        &self,
        intercept: &WorldPoint,
        normal: &UnitVector,
        material: &Material,
        eye_frame: &Frame,
        in_shadow: bool,
    ) -> Color {
        if !self.is_on {
            return BLACK;
        }
        if in_shadow {
            return ambient_color(material.ambient, self.color);
        }
        let v = Unit::new_normalize(eye_frame.origin - intercept);
        total_color(
            material,
            self.color,
            &v,
            normal,
            &self.actual_position(eye_frame),
            intercept,
            self.attenuation_on,
            &self.at_params,
        )
    }

    /// Ray from just above the surface toward this light.
    pub fn shadow_feeler(
        &self,
        intercept: &WorldPoint,
        normal: &UnitVector,
        eye_frame: &Frame,
    ) -> Ray {
        let origin = intercept + normal.as_ref() * EPSILON;
        Ray::new(origin, self.actual_position(eye_frame) - origin)
    }

    /// True iff some opaque object occludes this light from the intercept
    /// point. O(objects) exhaustive scan.
    pub fn point_is_in_a_shadow(
        &self,
        intercept: &WorldPoint,
        normal: &UnitVector,
        objects: &[VisibleShape],
        eye_frame: &Frame,
    ) -> bool {
        let feeler = self.shadow_feeler(intercept, normal, eye_frame);
        let light_distance = (self.actual_position(eye_frame) - intercept).norm();

        objects.iter().any(|object| {
            object
                .find_closest_intersection(&feeler)
                .is_some_and(|occluder| occluder.hit.t < light_distance)
        })
    }
}

#[derive(Clone, Debug)]
pub struct SpotLight {
    pub base: PositionalLight,
    /// Normalized cone axis
    pub dir: UnitVector,
    /// Full cone angle, radians
    pub fov: FloatType,
}

impl SpotLight {
    pub fn new(pos: WorldPoint, dir: WorldVector, fov: FloatType, color: Color) -> SpotLight {
        SpotLight {
            base: PositionalLight::new(pos, color),
            dir: Unit::new_normalize(dir),
            fov,
        }
    }

    pub fn set_dir(&mut self, dx: FloatType, dy: FloatType, dz: FloatType) {
        self.dir = Unit::new_normalize(WorldVector::new(dx, dy, dz));
    }

    /// Cone membership test. The boundary is exclusive: a point whose
    /// angular offset equals exactly half the field of view is outside.
    pub fn is_in_spotlight_cone(
        spot_pos: &WorldPoint,
        spot_dir: &UnitVector,
        spot_fov: FloatType,
        intercept: &WorldPoint,
    ) -> bool {
        let l = Unit::new_normalize(spot_pos - intercept);
        let spot_cosine = -l.dot(spot_dir);
        spot_cosine > (spot_fov / 2.0).cos()
    }

    /// Positional illumination gated by the cone test.
    pub fn illuminate(
        &self,
        intercept: &WorldPoint,
        normal: &UnitVector,
        material: &Material,
        eye_frame: &Frame,
        in_shadow: bool,
    ) -> Color {
        let pos = self.base.actual_position(eye_frame);
        if !Self::is_in_spotlight_cone(&pos, &self.dir, self.fov, intercept) {
            return BLACK;
        }
        self.base
            .illuminate(intercept, normal, material, eye_frame, in_shadow)
    }
}

/// The closed set of light variants the renderer understands.
#[derive(Clone, Debug)]
pub enum Light {
    Positional(PositionalLight),
    Spot(SpotLight),
}

impl Light {
    pub fn illuminate(
        &self,
        intercept: &WorldPoint,
        normal: &UnitVector,
        material: &Material,
        eye_frame: &Frame,
        in_shadow: bool,
    ) -> Color {
        match self {
            Light::Positional(light) => {
                light.illuminate(intercept, normal, material, eye_frame, in_shadow)
            }
            Light::Spot(light) => light.illuminate(intercept, normal, material, eye_frame, in_shadow),
        }
    }

    pub fn point_is_in_a_shadow(
        &self,
        intercept: &WorldPoint,
        normal: &UnitVector,
        objects: &[VisibleShape],
        eye_frame: &Frame,
    ) -> bool {
        self.positional()
            .point_is_in_a_shadow(intercept, normal, objects, eye_frame)
    }

    /// The positional core shared by every variant.
    pub fn positional(&self) -> &PositionalLight {
        match self {
            Light::Positional(light) => light,
            Light::Spot(light) => &light.base,
        }
    }

    /// Mutable access for between-pass scene updates (toggling, moving,
    /// recoloring a light).
    pub fn positional_mut(&mut self) -> &mut PositionalLight {
        match self {
            Light::Positional(light) => light,
            Light::Spot(light) => &mut light.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use crate::material;
    use crate::scene::{Shape, VisibleShape};
    use assert2::assert;

    fn unit(x: FloatType, y: FloatType, z: FloatType) -> UnitVector {
        Unit::new_normalize(WorldVector::new(x, y, z))
    }

    fn eye_frame() -> Frame {
        Frame::from_look_at(
            WorldPoint::new(0.0, 0.0, 10.0),
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldVector::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn ambient_is_componentwise_product() {
        let c = ambient_color(Color::new(0.5, 0.5, 0.5), Color::new(1.0, 0.5, 0.0));
        assert!(c == Color::new(0.5, 0.25, 0.0));
    }

    #[test]
    fn diffuse_follows_lambert_cosine() {
        let n = unit(0.0, 1.0, 0.0);
        let full = diffuse_color(WHITE, WHITE, &unit(0.0, 1.0, 0.0), &n);
        assert!((full.r - 1.0).abs() < 1e-12);

        let grazing = diffuse_color(WHITE, WHITE, &unit(1.0, 0.0, 0.0), &n);
        assert!(grazing == BLACK);

        let behind = diffuse_color(WHITE, WHITE, &unit(0.0, -1.0, 0.0), &n);
        assert!(behind == BLACK);
    }

    #[test]
    fn specular_sharpens_with_shininess() {
        let r = unit(0.0, 1.0, 0.0);
        let v = unit(1.0, 1.0, 0.0);
        let dull = specular_color(WHITE, WHITE, 1.0, &r, &v);
        let sharp = specular_color(WHITE, WHITE, 100.0, &r, &v);
        assert!(sharp.r < dull.r);
        assert!(dull.r > 0.0);
    }

    #[test]
    fn attenuation_guard_against_zero_denominator() {
        let params = AttenuationParams {
            constant: 0.0,
            linear: 0.0,
            quadratic: 0.0,
        };
        assert!(params.factor(7.0) == 1.0);
        assert!(params.factor(7.0).is_finite());
    }

    #[test]
    fn attenuation_falls_off_with_distance() {
        let params = AttenuationParams {
            constant: 1.0,
            linear: 1.0,
            quadratic: 0.0,
        };
        assert!(params.factor(0.0) == 1.0);
        assert!(params.factor(1.0) == 0.5);
        assert!(params.factor(3.0) == 0.25);
    }

    #[test]
    fn light_off_is_black() {
        let mut light = PositionalLight::new(WorldPoint::new(0.0, 5.0, 0.0), WHITE);
        light.is_on = false;
        let c = light.illuminate(
            &WorldPoint::new(0.0, 0.0, 0.0),
            &unit(0.0, 1.0, 0.0),
            &material::gold(),
            &eye_frame(),
            false,
        );
        assert!(c == BLACK);
    }

    #[test]
    fn shadowed_point_gets_ambient_only() {
        let light = PositionalLight::new(WorldPoint::new(0.0, 5.0, 0.0), WHITE);
        let mat = material::gold();
        let shadowed = light.illuminate(
            &WorldPoint::new(0.0, 0.0, 0.0),
            &unit(0.0, 1.0, 0.0),
            &mat,
            &eye_frame(),
            true,
        );
        assert!(shadowed == ambient_color(mat.ambient, WHITE));

        let lit = light.illuminate(
            &WorldPoint::new(0.0, 0.0, 0.0),
            &unit(0.0, 1.0, 0.0),
            &mat,
            &eye_frame(),
            false,
        );
        assert!(lit.r > shadowed.r);
        assert!(lit.g > shadowed.g);
    }

    #[test]
    fn occluder_between_light_and_point_casts_shadow() {
        let light = PositionalLight::new(WorldPoint::new(0.0, 10.0, 0.0), WHITE);
        let surface = WorldPoint::new(0.0, 0.0, 0.0);
        let normal = unit(0.0, 1.0, 0.0);

        let occluder = vec![VisibleShape::new(
            Shape::Sphere {
                center: WorldPoint::new(0.0, 5.0, 0.0),
                radius: 1.0,
            },
            material::tin(),
        )];
        assert!(light.point_is_in_a_shadow(&surface, &normal, &occluder, &eye_frame()));

        // Same shape moved aside no longer occludes
        let bystander = vec![VisibleShape::new(
            Shape::Sphere {
                center: WorldPoint::new(5.0, 5.0, 0.0),
                radius: 1.0,
            },
            material::tin(),
        )];
        assert!(!light.point_is_in_a_shadow(&surface, &normal, &bystander, &eye_frame()));

        // Objects behind the light do not occlude
        let behind = vec![VisibleShape::new(
            Shape::Sphere {
                center: WorldPoint::new(0.0, 20.0, 0.0),
                radius: 1.0,
            },
            material::tin(),
        )];
        assert!(!light.point_is_in_a_shadow(&surface, &normal, &behind, &eye_frame()));
    }

    #[test]
    fn camera_relative_light_moves_with_frame() {
        let mut light = PositionalLight::new(WorldPoint::new(0.0, 0.0, -5.0), WHITE);
        light.tied_to_world = false;
        let frame = eye_frame();
        // Five units in front of the eye, along the viewing direction
        let expected = frame.origin - frame.w.as_ref() * 5.0;
        assert!((light.actual_position(&frame) - expected).norm() < 1e-12);

        light.tied_to_world = true;
        assert!(light.actual_position(&frame) == light.pos);
    }

    #[test]
    fn spotlight_cone_inside_and_outside() {
        let pos = WorldPoint::new(0.0, 10.0, 0.0);
        let axis = unit(0.0, -1.0, 0.0);
        let fov = std::f64::consts::FRAC_PI_2;

        // Directly underneath: inside
        assert!(SpotLight::is_in_spotlight_cone(
            &pos,
            &axis,
            fov,
            &WorldPoint::new(0.0, 0.0, 0.0)
        ));
        // Way off to the side: outside
        assert!(!SpotLight::is_in_spotlight_cone(
            &pos,
            &axis,
            fov,
            &WorldPoint::new(100.0, 9.0, 0.0)
        ));
    }

    #[test]
    fn spotlight_cone_boundary_is_exclusive() {
        // An on-axis point has spot cosine exactly 1.0. With a tiny fov,
        // cos(fov/2) evaluates to exactly 1.0 as well, so the comparison is
        // exercised precisely at the boundary: strict `>` excludes the point.
        let pos = WorldPoint::new(0.0, 10.0, 0.0);
        let axis = unit(0.0, -1.0, 0.0);
        let on_axis = WorldPoint::new(0.0, 0.0, 0.0);

        assert!((1e-9f64 / 2.0).cos() == 1.0);
        assert!(!SpotLight::is_in_spotlight_cone(&pos, &axis, 1e-9, &on_axis));
        // Any real aperture admits the on-axis point again
        assert!(SpotLight::is_in_spotlight_cone(&pos, &axis, 0.1, &on_axis));
    }

    #[test]
    fn spotlight_outside_cone_is_black_even_unshadowed() {
        let spot = SpotLight::new(
            WorldPoint::new(0.0, 10.0, 0.0),
            WorldVector::new(0.0, -1.0, 0.0),
            std::f64::consts::FRAC_PI_4,
            WHITE,
        );
        let c = spot.illuminate(
            &WorldPoint::new(50.0, 0.0, 0.0),
            &unit(0.0, 1.0, 0.0),
            &material::gold(),
            &eye_frame(),
            false,
        );
        assert!(c == BLACK);

        let inside = spot.illuminate(
            &WorldPoint::new(0.0, 0.0, 0.0),
            &unit(0.0, 1.0, 0.0),
            &material::gold(),
            &eye_frame(),
            false,
        );
        assert!(inside != BLACK);
    }
}
