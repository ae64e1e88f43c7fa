//! A small recursive ray tracer: Phong-shaded analytic primitives with
//! textures, transparency compositing, shadows and mirror reflection,
//! rendered into an in-memory framebuffer.

pub mod camera;
pub mod color;
pub mod framebuffer;
pub mod geometry;
pub mod light;
pub mod material;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod visibility;

pub use camera::{Camera, Frame};
pub use color::Color;
pub use framebuffer::Framebuffer;
pub use renderer::{RayTracer, RenderSettings, raytrace_scene_parallel};
pub use scene::Scene;
