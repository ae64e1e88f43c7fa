use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::thread;

use crate::color;
use crate::framebuffer::Framebuffer;
use crate::renderer::{MAX_RECURSION_DEPTH, RayTracer, RenderSettings};
use crate::scene::Scene;

/// Renders `scene` into `framebuffer` on one worker thread per CPU. Workers
/// pull scanlines from a shared counter, shade them into a local row buffer
/// and merge the finished row under a lock, so the lock is taken once per
/// row rather than once per pixel. `finished_row_callback` runs on a worker
/// thread after each merged row; pass `|_| ()` when no progress reporting is
/// wanted.
///
/// Produces exactly the same pixels as [`RayTracer::raytrace_scene`], in a
/// nondeterministic row order.
pub fn raytrace_scene_parallel<F: Fn(u32) + Send + Sync>(
    tracer: &RayTracer,
    framebuffer: &mut Framebuffer,
    depth: i32,
    scene: &Scene,
    settings: RenderSettings,
    finished_row_callback: F,
) {
    let depth = depth.clamp(0, MAX_RECURSION_DEPTH);
    let width = framebuffer.width();
    let height = framebuffer.height();

    let next_row = AtomicUsize::new(0);
    let output = Mutex::new(framebuffer);

    let worker_count = num_cpus::get();
    log::debug!("rendering {width}x{height} on {worker_count} workers");

    thread::scope(|scope| {
        for _ in 0..worker_count {
            scope.spawn(|| {
                let mut row = Vec::with_capacity(width as usize);

                loop {
                    let y = next_row.fetch_add(1, Ordering::AcqRel) as u32;
                    if y >= height {
                        break;
                    }

                    row.clear();
                    for x in 0..width {
                        let color = tracer.render_pixel(scene, x, y, depth, settings);
                        row.push(color::clamp01(color));
                    }

                    {
                        let mut framebuffer = output.lock().expect("poisoned framebuffer lock");
                        for (x, &color) in row.iter().enumerate() {
                            framebuffer.set_color(x as u32, y, color);
                        }
                    }
                    finished_row_callback(y);
                }
            });
        }
    });
}
