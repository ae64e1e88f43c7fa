mod machinery;

pub use machinery::raytrace_scene_parallel;

use itertools::iproduct;

use crate::color::{self, BLACK, Color};
use crate::framebuffer::Framebuffer;
use crate::geometry::{EPSILON, FloatType, Ray, reflect};
use crate::scene::{Scene, find_closest_opaque, find_closest_transparent};

/// Upper bound on reflective bounces; caller-supplied depths are clamped
/// into [0, MAX_RECURSION_DEPTH] before tracing starts.
pub const MAX_RECURSION_DEPTH: i32 = 16;

/// Every hit contributes a mirror bounce at this fixed weight, regardless of
/// the material. A per-material reflectivity coefficient would be cleaner;
/// this matches the established shading behavior.
const REFLECTION_WEIGHT: FloatType = 0.3;

#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    /// Supersampling multiplier: each pixel averages an n×n grid of subpixel
    /// rays. 1 disables antialiasing.
    pub antialias: std::num::NonZeroU32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            antialias: std::num::NonZeroU32::MIN,
        }
    }
}

/// Recursive ray tracer. Holds only the background color; everything else
/// is borrowed per render pass.
pub struct RayTracer {
    default_color: Color,
}

impl RayTracer {
    pub fn new(default_color: Color) -> RayTracer {
        RayTracer { default_color }
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Fully populates `framebuffer` with a synchronous render of `scene`,
    /// tracing up to `depth` reflective bounces per ray. Pixel channels are
    /// clamped to [0, 1] before being written.
    pub fn raytrace_scene(&self, framebuffer: &mut Framebuffer, depth: i32, scene: &Scene) {
        self.raytrace_scene_with(framebuffer, depth, scene, RenderSettings::default());
    }

    pub fn raytrace_scene_with(
        &self,
        framebuffer: &mut Framebuffer,
        depth: i32,
        scene: &Scene,
        settings: RenderSettings,
    ) {
        let depth = depth.clamp(0, MAX_RECURSION_DEPTH);
        for (y, x) in iproduct!(0..framebuffer.height(), 0..framebuffer.width()) {
            let color = self.render_pixel(scene, x, y, depth, settings);
            framebuffer.set_color(x, y, color::clamp01(color));
        }
    }

    /// Unclamped color of one pixel, averaging the supersampling grid.
    pub(crate) fn render_pixel(
        &self,
        scene: &Scene,
        x: u32,
        y: u32,
        depth: i32,
        settings: RenderSettings,
    ) -> Color {
        let n = settings.antialias.get();
        if n == 1 {
            return self.trace_ray(&scene.camera.get_ray(x, y), scene, depth);
        }

        let mut sum = BLACK;
        for (sy, sx) in iproduct!(0..n, 0..n) {
            let px = x as FloatType + (sx as FloatType + 0.5) / n as FloatType;
            let py = y as FloatType + (sy as FloatType + 0.5) / n as FloatType;
            sum += self.trace_ray(&scene.camera.ray_through(px, py), scene, depth);
        }
        sum * (1.0 / (n * n) as FloatType)
    }

    /// One trace step: shade the nearest opaque hit under every light,
    /// composite texture and transparency, then recurse for the mirror
    /// bounce. Depth below zero terminates without touching the scene.
    pub(crate) fn trace_ray(&self, ray: &Ray, scene: &Scene, depth: i32) -> Color {
        if depth < 0 {
            return self.default_color;
        }

        let opaque_hit = find_closest_opaque(ray, &scene.opaque_objects);
        let transparent_hit = find_closest_transparent(ray, &scene.transparent_objects);

        let mut total = BLACK;
        for light in &scene.lights {
            let color = match &opaque_hit {
                Some(surface) => {
                    let in_shadow = light.point_is_in_a_shadow(
                        &surface.hit.point,
                        &surface.hit.normal,
                        &scene.opaque_objects,
                        scene.camera.frame(),
                    );
                    let mut color = light.illuminate(
                        &surface.hit.point,
                        &surface.hit.normal,
                        surface.material,
                        scene.camera.frame(),
                        in_shadow,
                    );
                    if let (Some(texture), Some(uv)) = (surface.texture, surface.hit.uv) {
                        color = color * 0.5 + texture.get_pixel_uv(uv.x, uv.y) * 0.5;
                    }
                    match &transparent_hit {
                        Some(veil) if veil.t < surface.hit.t => {
                            color * (1.0 - veil.alpha) + veil.color * veil.alpha
                        }
                        _ => color,
                    }
                }
                None => match &transparent_hit {
                    Some(veil) => self.default_color * 0.5 + veil.color * 0.5,
                    None => self.default_color,
                },
            };
            total += color;
        }

        if let Some(surface) = &opaque_hit {
            let origin = surface.hit.point + surface.hit.normal.as_ref() * EPSILON;
            let direction = reflect(&ray.direction, &surface.hit.normal);
            let bounce = Ray::new(origin, direction);
            total += self.trace_ray(&bounce, scene, depth - 1) * REFLECTION_WEIGHT;
        }

        total
    }
}
