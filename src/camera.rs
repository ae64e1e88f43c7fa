use assert2::assert;
use bon::bon;
use nalgebra::Unit;

use crate::geometry::{FloatType, Ray, UnitVector, WorldPoint, WorldVector};

/// An oriented coordinate system: origin plus orthonormal axes u, v, w.
/// `w` points from the look-at target toward the origin, so a camera using
/// this frame looks along `-w`.
#[derive(Copy, Clone, Debug)]
pub struct Frame {
    pub origin: WorldPoint,
    pub u: UnitVector,
    pub v: UnitVector,
    pub w: UnitVector,
}

impl Frame {
    /// Builds the frame from a position, a look-at point and an up hint via
    /// Gram-Schmidt. `up` must not be parallel to the viewing direction.
    pub fn from_look_at(origin: WorldPoint, focus: WorldPoint, up: WorldVector) -> Frame {
        let w = Unit::try_new(origin - focus, FloatType::EPSILON)
            .expect("Camera position and focus point must differ");
        let u = Unit::try_new(up.cross(&w), FloatType::EPSILON)
            .expect("`up` must not be parallel to the viewing direction");
        let v = Unit::new_normalize(w.cross(&u));

        Frame { origin, u, v, w }
    }

    /// Maps coordinates expressed in this frame into world space.
    pub fn to_world_coords(&self, local: &WorldVector) -> WorldPoint {
        self.origin
            + self.u.as_ref() * local.x
            + self.v.as_ref() * local.y
            + self.w.as_ref() * local.z
    }
}

#[derive(Copy, Clone, Debug)]
enum Projection {
    Perspective {
        /// Distance from the eye to the image plane
        dist_to_plane: FloatType,
    },
    Orthographic,
}

#[derive(Copy, Clone, Debug)]
pub struct Camera {
    frame: Frame,
    projection: Projection,

    nx: u32,
    ny: u32,

    // Image plane bounds in camera space
    left: FloatType,
    right: FloatType,
    bottom: FloatType,
    top: FloatType,
}

#[bon]
impl Camera {
    /// Perspective camera with the given full field-of-view angle (radians).
    /// The image plane sits at a fixed distance of 1 in front of the eye;
    /// its height follows from the FOV and its width from the aspect ratio.
    #[builder(finish_fn = build)]
    pub fn perspective(
        position: WorldPoint,
        focus: WorldPoint,
        up: WorldVector,
        fov: FloatType,
        nx: u32,
        ny: u32,
    ) -> Camera {
        assert!(nx > 0);
        assert!(ny > 0);
        assert!(fov > 0.0 && fov < std::f64::consts::PI);

        let dist_to_plane = 1.0;
        let top = dist_to_plane * (fov / 2.0).tan();
        let right = top * nx as FloatType / ny as FloatType;

        Camera {
            frame: Frame::from_look_at(position, focus, up),
            projection: Projection::Perspective { dist_to_plane },
            nx,
            ny,
            left: -right,
            right,
            bottom: -top,
            top,
        }
    }

    /// Orthographic camera. `scale` is the width of one pixel in world units.
    #[builder(finish_fn = build)]
    pub fn orthographic(
        position: WorldPoint,
        focus: WorldPoint,
        up: WorldVector,
        scale: FloatType,
        nx: u32,
        ny: u32,
    ) -> Camera {
        assert!(nx > 0);
        assert!(ny > 0);
        assert!(scale > 0.0);

        let right = nx as FloatType * scale / 2.0;
        let top = ny as FloatType * scale / 2.0;

        Camera {
            frame: Frame::from_look_at(position, focus, up),
            projection: Projection::Orthographic,
            nx,
            ny,
            left: -right,
            right,
            bottom: -top,
            top,
        }
    }
}

impl Camera {
    /// The viewing ray through the center of pixel (x, y). Pixel row 0 is at
    /// the bottom of the image.
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        self.ray_through(x as FloatType + 0.5, y as FloatType + 0.5)
    }

    /// The viewing ray through fractional pixel coordinates, used for
    /// subpixel supersampling.
    pub fn ray_through(&self, px: FloatType, py: FloatType) -> Ray {
        let plane_x = self.left + (self.right - self.left) * px / self.nx as FloatType;
        let plane_y = self.bottom + (self.top - self.bottom) * py / self.ny as FloatType;

        let frame = &self.frame;
        match self.projection {
            Projection::Perspective { dist_to_plane } => Ray::new(
                frame.origin,
                frame.u.as_ref() * plane_x + frame.v.as_ref() * plane_y
                    - frame.w.as_ref() * dist_to_plane,
            ),
            Projection::Orthographic => Ray::new(
                frame.origin + frame.u.as_ref() * plane_x + frame.v.as_ref() * plane_y,
                -frame.w.into_inner(),
            ),
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn nx(&self) -> u32 {
        self.nx
    }

    pub fn ny(&self) -> u32 {
        self.ny
    }

    pub fn top(&self) -> FloatType {
        self.top
    }

    pub fn bottom(&self) -> FloatType {
        self.bottom
    }

    pub fn left(&self) -> FloatType {
        self.left
    }

    pub fn right(&self) -> FloatType {
        self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    fn test_camera() -> Camera {
        // X goes right, Y is up, camera looks along -Z
        Camera::perspective()
            .position(WorldPoint::new(0.0, 0.0, 0.0))
            .focus(WorldPoint::new(0.0, 0.0, -10.0))
            .up(WorldVector::new(0.0, 1.0, 0.0))
            .fov(std::f64::consts::FRAC_PI_2)
            .nx(800)
            .ny(600)
            .build()
    }

    #[test]
    fn frame_is_orthonormal() {
        let frame = Frame::from_look_at(
            WorldPoint::new(3.0, 3.0, 8.0),
            WorldPoint::new(6.0, 10.0, -1.0),
            WorldVector::new(0.0, 1.0, 0.0),
        );
        assert!(frame.u.dot(&frame.v).abs() < 1e-12);
        assert!(frame.u.dot(&frame.w).abs() < 1e-12);
        assert!(frame.v.dot(&frame.w).abs() < 1e-12);
        assert!((frame.u.norm() - 1.0).abs() < 1e-12);
        assert!((frame.v.norm() - 1.0).abs() < 1e-12);
        assert!((frame.w.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn w_points_from_focus_to_origin() {
        let frame = Frame::from_look_at(
            WorldPoint::new(0.0, 0.0, 5.0),
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldVector::new(0.0, 1.0, 0.0),
        );
        assert!((frame.w.into_inner() - WorldVector::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn to_world_coords_roundtrip() {
        let frame = Frame::from_look_at(
            WorldPoint::new(1.0, 2.0, 3.0),
            WorldPoint::new(0.0, 0.0, 0.0),
            WorldVector::new(0.0, 1.0, 0.0),
        );
        assert!((frame.to_world_coords(&WorldVector::zeros()) - frame.origin).norm() < 1e-12);
        let p = frame.to_world_coords(&WorldVector::new(0.0, 0.0, -2.0));
        // Two units in front of the camera, along the viewing direction
        assert!((p - (frame.origin - frame.w.as_ref() * 2.0)).norm() < 1e-12);
    }

    #[test]
    fn perspective_plane_bounds_follow_fov() {
        let camera = test_camera();
        // fov 90° with the plane at distance 1: top = tan(45°) = 1
        assert!((camera.top() - 1.0).abs() < 1e-12);
        assert!((camera.bottom() + 1.0).abs() < 1e-12);
        assert!((camera.right() - 800.0 / 600.0).abs() < 1e-12);
        assert!(camera.left() == -camera.right());
    }

    #[test]
    fn perspective_rays_fan_out() {
        let camera = test_camera();

        let center = camera.get_ray(400, 300);
        let left = camera.get_ray(0, 300);
        let right = camera.get_ray(799, 300);
        let up = camera.get_ray(400, 599);
        let down = camera.get_ray(400, 0);

        // Center ray goes straight down -w, all origins at the eye
        assert!((center.origin - camera.frame().origin).norm() == 0.0);
        assert!((left.origin - camera.frame().origin).norm() == 0.0);
        assert!(center.direction.x.abs() < 2e-3);
        assert!(center.direction.y.abs() < 2e-3);
        assert!(center.direction.z < 0.0);

        assert!(left.direction.x < center.direction.x);
        assert!(right.direction.x > center.direction.x);
        assert!(up.direction.y > center.direction.y);
        assert!(down.direction.y < center.direction.y);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let camera = Camera::orthographic()
            .position(WorldPoint::new(0.0, 0.0, 0.0))
            .focus(WorldPoint::new(20.0, 0.0, 0.0))
            .up(WorldVector::new(0.0, 1.0, 0.0))
            .scale(1.0)
            .nx(200)
            .ny(200)
            .build();

        let a = camera.get_ray(0, 0);
        let b = camera.get_ray(199, 123);
        assert!((a.direction.into_inner() - b.direction.into_inner()).norm() < 1e-12);
        // Looks along +X, origins offset within the image plane
        assert!((a.direction.into_inner() - WorldVector::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((a.origin - b.origin).norm() > 0.0);
    }
}
