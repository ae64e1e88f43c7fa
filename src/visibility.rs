//! Ray/sphere visibility probes. These answer coarse yes/no questions about
//! a scene without shading anything, e.g. for placing objects in front of a
//! camera before committing to a full render.

use itertools::iproduct;

use crate::camera::Camera;
use crate::geometry::{FloatType, Ray};
use crate::scene::Shape;

/// Whether the ray hits the shape at all.
pub fn ray_intersects_sphere(ray: &Ray, sphere: &Shape) -> bool {
    !sphere.find_intersections(ray).is_empty()
}

fn closest_t(ray: &Ray, shape: &Shape) -> FloatType {
    shape
        .find_intersections(ray)
        .first()
        .map_or(FloatType::INFINITY, |hit| hit.t)
}

/// Which of two spheres the ray reaches first: 0 when it misses both,
/// 1 or 2 when the correspondingly numbered sphere is strictly nearer,
/// 3 when both are hit at the same distance.
pub fn which_sphere(ray: &Ray, sphere1: &Shape, sphere2: &Shape) -> u8 {
    let t1 = closest_t(ray, sphere1);
    let t2 = closest_t(ray, sphere2);

    if t1.is_infinite() && t2.is_infinite() {
        0
    } else if t1 < t2 {
        1
    } else if t2 < t1 {
        2
    } else {
        3
    }
}

/// Whether any pixel of the camera's image has a viewing ray that hits the
/// sphere. Exhaustive over the pixel grid, so the answer is exact at pixel
/// resolution but blind to subpixel slivers.
pub fn camera_sees_sphere(camera: &Camera, sphere: &Shape) -> bool {
    iproduct!(0..camera.ny(), 0..camera.nx())
        .any(|(y, x)| ray_intersects_sphere(&camera.get_ray(x, y), sphere))
}
