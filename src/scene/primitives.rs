use arrayvec::ArrayVec;
use nalgebra::Unit;
use std::f64::consts::{PI, TAU};

use crate::geometry::{
    EPSILON, FloatType, HitRecord, Ray, TexturePoint, WorldPoint, WorldVector, solve_quadratic,
};

/// At most two hits per shape, sorted ascending by t.
pub type Hits = ArrayVec<HitRecord, 2>;

/// Analytic shapes. Each variant answers "where does this ray hit me?" by
/// solving its implicit equation against the ray's parametric line.
///
/// The Y-axis solids are axis-aligned: cylinders are centered on their
/// mid-height point, cones hang downward from their apex. Closed variants
/// additionally carry cap disks.
#[derive(Clone, Debug)]
pub enum Shape {
    Sphere {
        center: WorldPoint,
        radius: FloatType,
    },
    Plane {
        point: WorldPoint,
        normal: Unit<WorldVector>,
    },
    Disk {
        center: WorldPoint,
        normal: Unit<WorldVector>,
        radius: FloatType,
    },
    Ellipsoid {
        center: WorldPoint,
        radii: WorldVector,
    },
    CylinderY {
        center: WorldPoint,
        radius: FloatType,
        height: FloatType,
    },
    ClosedCylinderY {
        center: WorldPoint,
        radius: FloatType,
        height: FloatType,
    },
    ConeY {
        apex: WorldPoint,
        radius: FloatType,
        height: FloatType,
    },
    ClosedConeY {
        apex: WorldPoint,
        radius: FloatType,
        height: FloatType,
    },
}

impl Shape {
    /// All forward intersections of `ray` with this shape, nearest first.
    /// Hits closer than [`EPSILON`] count as behind the origin and are
    /// dropped. A tangent ray yields exactly one hit.
    pub fn find_intersections(&self, ray: &Ray) -> Hits {
        match self {
            Shape::Sphere { center, radius } => sphere_hits(ray, center, *radius),
            Shape::Plane { point, normal } => plane_hit(ray, point, normal).into_iter().collect(),
            Shape::Disk {
                center,
                normal,
                radius,
            } => disk_hit(ray, center, normal, *radius).into_iter().collect(),
            Shape::Ellipsoid { center, radii } => ellipsoid_hits(ray, center, radii),
            Shape::CylinderY {
                center,
                radius,
                height,
            } => cylinder_side_hits(ray, center, *radius, *height),
            Shape::ClosedCylinderY {
                center,
                radius,
                height,
            } => {
                let mut candidates: ArrayVec<HitRecord, 4> =
                    cylinder_side_hits(ray, center, *radius, *height)
                        .into_iter()
                        .collect();
                let half = height / 2.0;
                for (cap_y, cap_normal) in [(half, 1.0), (-half, -1.0)] {
                    let cap_center = WorldPoint::new(center.x, center.y + cap_y, center.z);
                    let normal = Unit::new_unchecked(WorldVector::new(0.0, cap_normal, 0.0));
                    if let Some(hit) = disk_hit(ray, &cap_center, &normal, *radius) {
                        candidates.push(hit);
                    }
                }
                nearest_two(candidates)
            }
            Shape::ConeY {
                apex,
                radius,
                height,
            } => cone_side_hits(ray, apex, *radius, *height),
            Shape::ClosedConeY {
                apex,
                radius,
                height,
            } => {
                let mut candidates: ArrayVec<HitRecord, 4> =
                    cone_side_hits(ray, apex, *radius, *height)
                        .into_iter()
                        .collect();
                let base_center = WorldPoint::new(apex.x, apex.y - height, apex.z);
                let normal = Unit::new_unchecked(WorldVector::new(0.0, -1.0, 0.0));
                if let Some(hit) = disk_hit(ray, &base_center, &normal, *radius) {
                    candidates.push(hit);
                }
                nearest_two(candidates)
            }
        }
    }
}

/// Keeps quadratic roots that lie in front of the ray origin. A double root
/// is reported once.
fn forward_roots(roots: Option<(FloatType, FloatType)>) -> ArrayVec<FloatType, 2> {
    let mut out = ArrayVec::new();
    if let Some((t1, t2)) = roots {
        if t1 > EPSILON {
            out.push(t1);
        }
        if t2 > EPSILON && t2 != t1 {
            out.push(t2);
        }
    }
    out
}

fn nearest_two(mut candidates: ArrayVec<HitRecord, 4>) -> Hits {
    candidates.sort_unstable_by(|a, b| a.t.total_cmp(&b.t));
    candidates.into_iter().take(2).collect()
}

fn sphere_hits(ray: &Ray, center: &WorldPoint, radius: FloatType) -> Hits {
    let oc = ray.origin - center;
    let b = 2.0 * oc.dot(&ray.direction);
    let c = oc.norm_squared() - radius * radius;

    forward_roots(solve_quadratic(1.0, b, c))
        .into_iter()
        .map(|t| {
            let point = ray.point_at(t);
            let outward = point - center;
            HitRecord {
                t,
                point,
                normal: Unit::new_normalize(outward),
                uv: Some(sphere_uv(&outward, radius)),
            }
        })
        .collect()
}

fn sphere_uv(outward: &WorldVector, radius: FloatType) -> TexturePoint {
    let u = 0.5 + outward.z.atan2(outward.x) / TAU;
    let v = 0.5 + (outward.y / radius).clamp(-1.0, 1.0).asin() / PI;
    TexturePoint::new(u, v)
}

fn plane_hit(ray: &Ray, point: &WorldPoint, normal: &Unit<WorldVector>) -> Option<HitRecord> {
    let denom = normal.dot(&ray.direction);
    if denom.abs() < EPSILON {
        // Ray (effectively) parallel to the plane
        return None;
    }
    let t = (point - ray.origin).dot(normal) / denom;
    if t <= EPSILON {
        return None;
    }
    Some(HitRecord {
        t,
        point: ray.point_at(t),
        normal: *normal,
        uv: None,
    })
}

fn disk_hit(
    ray: &Ray,
    center: &WorldPoint,
    normal: &Unit<WorldVector>,
    radius: FloatType,
) -> Option<HitRecord> {
    plane_hit(ray, center, normal).filter(|hit| (hit.point - center).norm() <= radius)
}

fn ellipsoid_hits(ray: &Ray, center: &WorldPoint, radii: &WorldVector) -> Hits {
    let oc = (ray.origin - center).component_div(radii);
    let d = ray.direction.component_div(radii);

    let a = d.norm_squared();
    let b = 2.0 * oc.dot(&d);
    let c = oc.norm_squared() - 1.0;

    forward_roots(solve_quadratic(a, b, c))
        .into_iter()
        .map(|t| {
            let point = ray.point_at(t);
            // Gradient of the implicit equation: (p - c) / r², componentwise
            let gradient = (point - center)
                .component_div(radii)
                .component_div(radii);
            HitRecord {
                t,
                point,
                normal: Unit::new_normalize(gradient),
                uv: None,
            }
        })
        .collect()
}

fn cylinder_side_hits(
    ray: &Ray,
    center: &WorldPoint,
    radius: FloatType,
    height: FloatType,
) -> Hits {
    let oc = ray.origin - center;
    let d = ray.direction;

    let a = d.x * d.x + d.z * d.z;
    let b = 2.0 * (oc.x * d.x + oc.z * d.z);
    let c = oc.x * oc.x + oc.z * oc.z - radius * radius;

    let half = height / 2.0;
    forward_roots(solve_quadratic(a, b, c))
        .into_iter()
        .filter_map(|t| {
            let point = ray.point_at(t);
            if (point.y - center.y).abs() > half {
                return None;
            }
            let radial = WorldVector::new(point.x - center.x, 0.0, point.z - center.z);
            let u = 0.5 + radial.z.atan2(radial.x) / TAU;
            let v = (point.y - (center.y - half)) / height;
            Some(HitRecord {
                t,
                point,
                normal: Unit::new_normalize(radial),
                uv: Some(TexturePoint::new(u, v)),
            })
        })
        .collect()
}

fn cone_side_hits(ray: &Ray, apex: &WorldPoint, radius: FloatType, height: FloatType) -> Hits {
    let k2 = (radius / height) * (radius / height);
    let w = ray.origin - apex;
    let d = ray.direction;

    let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
    let b = 2.0 * (w.x * d.x + w.z * d.z - k2 * w.y * d.y);
    let c = w.x * w.x + w.z * w.z - k2 * w.y * w.y;

    forward_roots(solve_quadratic(a, b, c))
        .into_iter()
        .filter_map(|t| {
            let point = ray.point_at(t);
            if point.y > apex.y || point.y < apex.y - height {
                return None;
            }
            let gradient = WorldVector::new(
                point.x - apex.x,
                -k2 * (point.y - apex.y),
                point.z - apex.z,
            );
            Some(HitRecord {
                t,
                point,
                normal: Unit::new_normalize(gradient),
                uv: None,
            })
        })
        .collect()
}
