use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use miniray::color::{self, Color};
use nalgebra::Unit;
use miniray::geometry::{WorldPoint, WorldVector};
use miniray::light::{Light, PositionalLight, SpotLight};
use miniray::material;
use miniray::scene::{Shape, TransparentShape, VisibleShape};
use miniray::texture::Texture;
use miniray::{Camera, Framebuffer, RayTracer, Scene};

fn bench_scene(nx: u32, ny: u32) -> Scene {
    let camera = Camera::perspective()
        .position(WorldPoint::new(0.0, 6.0, 20.0))
        .focus(WorldPoint::new(0.0, 2.0, 0.0))
        .up(WorldVector::new(0.0, 1.0, 0.0))
        .fov(std::f64::consts::FRAC_PI_2)
        .nx(nx)
        .ny(ny)
        .build();
    let mut scene = Scene::new(camera);

    scene.add_opaque_object(VisibleShape::new(
        Shape::Plane {
            point: WorldPoint::new(0.0, -2.0, 0.0),
            normal: Unit::new_normalize(WorldVector::new(0.0, 1.0, 0.0)),
        },
        material::tin(),
    ));
    scene.add_opaque_object(VisibleShape::with_texture(
        Shape::Sphere {
            center: WorldPoint::new(-4.0, 2.0, 0.0),
            radius: 3.0,
        },
        material::gold(),
        Texture::checkerboard(64, 64, 8, color::WHITE, Color::new(0.2, 0.2, 0.6)),
    ));
    scene.add_opaque_object(VisibleShape::new(
        Shape::ClosedCylinderY {
            center: WorldPoint::new(5.0, 2.0, -2.0),
            radius: 2.0,
            height: 6.0,
        },
        material::ruby(),
    ));
    scene.add_transparent_object(TransparentShape::new(
        Shape::Plane {
            point: WorldPoint::new(0.0, 0.0, 8.0),
            normal: Unit::new_normalize(WorldVector::new(0.0, 0.0, -1.0)),
        },
        color::RED,
        0.25,
    ));

    scene.add_light(Light::Positional(PositionalLight::new(
        WorldPoint::new(0.0, 20.0, 15.0),
        color::WHITE,
    )));
    scene.add_light(Light::Spot(SpotLight::new(
        WorldPoint::new(0.0, 10.0, 20.0),
        WorldVector::new(0.0, -0.3, -1.0),
        std::f64::consts::FRAC_PI_3,
        color::BLUE,
    )));

    scene
}

fn criterion_benchmark(c: &mut Criterion) {
    let scene = bench_scene(160, 120);
    let tracer = RayTracer::new(color::BLACK);

    c.bench_function("render_scene", |b| {
        let mut framebuffer = Framebuffer::new(160, 120);
        b.iter(|| tracer.raytrace_scene(&mut framebuffer, 2, &scene))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20).measurement_time(Duration::from_secs(30));
    targets = criterion_benchmark
}
criterion_main!(benches);
