use std::num::NonZeroU32;
use std::time::Instant;

use indicatif::ProgressBar;
use nalgebra::Unit;

use miniray::color::{self, Color};
use miniray::geometry::{WorldPoint, WorldVector};
use miniray::light::{Light, PositionalLight, SpotLight};
use miniray::material;
use miniray::scene::{Shape, TransparentShape, VisibleShape};
use miniray::texture::Texture;
use miniray::{Camera, Framebuffer, RayTracer, RenderSettings, Scene, raytrace_scene_parallel};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const REFLECTIONS: i32 = 2;

fn build_scene() -> Scene {
    let camera = Camera::perspective()
        .position(WorldPoint::new(-10.0, 12.0, 18.0))
        .focus(WorldPoint::new(-3.0, 7.0, 0.0))
        .up(WorldVector::new(0.0, 1.0, 0.0))
        .fov(120.0_f64.to_radians())
        .nx(WIDTH)
        .ny(HEIGHT)
        .build();
    let mut scene = Scene::new(camera);

    // Two tilted floor planes meeting in a valley, plus a back wall
    scene.add_opaque_object(VisibleShape::new(
        Shape::Plane {
            point: WorldPoint::new(0.0, -20.0, 0.0),
            normal: Unit::new_normalize(WorldVector::new(0.5, 1.0, 0.0)),
        },
        material::tin(),
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::Plane {
            point: WorldPoint::new(0.0, -20.0, 0.0),
            normal: Unit::new_normalize(WorldVector::new(-0.5, 1.0, 0.0)),
        },
        material::tin(),
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::Plane {
            point: WorldPoint::new(0.0, 0.0, -12.0),
            normal: Unit::new_normalize(WorldVector::new(0.0, 0.0, 1.0)),
        },
        material::tin(),
    ));

    // A red translucent pane off to the right
    scene.add_transparent_object(TransparentShape::new(
        Shape::Plane {
            point: WorldPoint::new(35.0, 0.0, 0.0),
            normal: Unit::new_normalize(WorldVector::new(-1.0, 0.0, 0.0)),
        },
        color::RED,
        0.25,
    ));

    let flag = Texture::checkerboard(
        128,
        128,
        16,
        Color::new(0.8, 0.1, 0.1),
        Color::new(0.9, 0.9, 0.95),
    );
    scene.add_opaque_object(VisibleShape::with_texture(
        Shape::CylinderY {
            center: WorldPoint::new(10.0, 6.0, 0.0),
            radius: 8.0,
            height: 12.0,
        },
        material::bronze(),
        flag,
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::CylinderY {
            center: WorldPoint::new(-5.0, 16.0, 5.0),
            radius: 5.0,
            height: 9.0,
        },
        material::ruby(),
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::CylinderY {
            center: WorldPoint::new(30.0, 20.0, 5.0),
            radius: 7.0,
            height: 14.0,
        },
        material::pewter(),
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::ClosedConeY {
            apex: WorldPoint::new(18.0, 15.0, 12.0),
            radius: 6.0,
            height: 7.0,
        },
        material::gold(),
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::Sphere {
            center: WorldPoint::new(-23.0, 10.0, -5.0),
            radius: 7.0,
        },
        material::polished_silver(),
    ));

    let shell = Texture::checkerboard(
        64,
        64,
        8,
        Color::new(0.55, 0.35, 0.15),
        Color::new(0.95, 0.85, 0.6),
    );
    scene.add_opaque_object(VisibleShape::with_texture(
        Shape::Sphere {
            center: WorldPoint::new(-10.0, 3.0, 8.5),
            radius: 5.0,
        },
        material::brass(),
        shell,
    ));

    scene.add_light(Light::Positional(PositionalLight::new(
        WorldPoint::new(0.0, 25.0, 15.0),
        color::PALE_GREEN,
    )));
    scene.add_light(Light::Spot(SpotLight::new(
        WorldPoint::new(2.0, 10.0, 100.0),
        WorldVector::new(0.05, 0.0, -1.0),
        100.0_f64.to_radians(),
        color::BLUE,
    )));

    scene
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let scene = build_scene();
    let tracer = RayTracer::new(color::BLACK);
    let settings = RenderSettings {
        antialias: NonZeroU32::new(3).unwrap(),
    };
    let mut framebuffer = Framebuffer::new(WIDTH, HEIGHT);

    let bar = ProgressBar::new(HEIGHT as u64);
    let start = Instant::now();
    raytrace_scene_parallel(&tracer, &mut framebuffer, REFLECTIONS, &scene, settings, |_| {
        bar.inc(1)
    });
    bar.finish();
    log::info!("render time: {:.2} s", start.elapsed().as_secs_f64());

    framebuffer.to_image().save("render.png")?;
    Ok(())
}
