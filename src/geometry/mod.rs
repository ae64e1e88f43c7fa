use nalgebra::Unit;

pub type FloatType = f64;
pub type WorldPoint = nalgebra::Point3<FloatType>;
pub type WorldVector = nalgebra::Vector3<FloatType>;
pub type UnitVector = Unit<WorldVector>;
pub type TexturePoint = nalgebra::Point2<FloatType>;

/// Intersections closer than this along a ray are treated as behind the
/// origin, and surface points are offset by this much along the normal
/// before casting secondary rays. Prevents shadow/reflection acne.
pub const EPSILON: FloatType = 1e-3;

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: WorldPoint,
    /// Normalized direction of the ray
    pub direction: UnitVector,
}

impl Ray {
    pub fn new(origin: WorldPoint, direction: WorldVector) -> Ray {
        Ray {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    pub fn point_at(&self, t: FloatType) -> WorldPoint {
        self.origin + self.direction.as_ref() * t
    }
}

/// Result of a ray/shape intersection query. Shape queries return these
/// sorted ascending by `t`; absence of a hit is `None`/an empty list, never
/// a sentinel record.
#[derive(Copy, Clone, Debug)]
pub struct HitRecord {
    /// Distance along the ray
    pub t: FloatType,
    pub point: WorldPoint,
    /// Unit normal pointing out of the shape's interior
    pub normal: UnitVector,
    /// Texture coordinates, for shapes that define a parameterization
    pub uv: Option<TexturePoint>,
}

/// Solves `a·t² + b·t + c = 0`. Returns the roots sorted ascending; a
/// tangent (double) root comes back as two equal values. Degenerate linear
/// equations (`a ≈ 0`) yield their single root twice.
pub fn solve_quadratic(
    a: FloatType,
    b: FloatType,
    c: FloatType,
) -> Option<(FloatType, FloatType)> {
    if a.abs() < FloatType::EPSILON {
        if b.abs() < FloatType::EPSILON {
            return None;
        }
        let t = -c / b;
        return Some((t, t));
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);
    if t1 <= t2 { Some((t1, t2)) } else { Some((t2, t1)) }
}

/// Mirror-reflects `direction` about `normal`.
pub fn reflect(direction: &WorldVector, normal: &UnitVector) -> WorldVector {
    direction - normal.as_ref() * (2.0 * direction.dot(normal))
}
