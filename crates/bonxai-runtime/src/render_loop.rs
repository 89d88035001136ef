use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use bonxai_grid::VoxelGrid;
use bonxai_render_raylib::{CameraState, DrawTarget, FrameInput, Surface, render_frame};

use crate::ColorFn;
use crate::config::VisConfig;

/// Everything the render thread reads.
pub(crate) struct LoopContext<T> {
    pub grid: std::sync::Arc<VoxelGrid<T>>,
    pub color_fn: ColorFn<T>,
    pub config: VisConfig,
}

/// Runs frames until `running` clears or the surface asks to close. The
/// surface is dropped (closed) by the caller afterwards.
pub(crate) fn run<T: Clone, S: Surface>(
    surface: &mut S,
    ctx: &LoopContext<T>,
    running: &AtomicBool,
    frames: &AtomicU64,
) {
    let mut camera = ctx.config.camera_state();
    let background = ctx.config.background_color();
    while running.load(Ordering::Acquire) && !surface.should_close() {
        let input = surface.poll_input();
        apply_input(surface, &mut camera, input);

        let mut cells = 0usize;
        surface.draw_frame(&camera, background, &mut |target: &mut dyn DrawTarget| {
            cells = render_frame(target, &ctx.grid, &*ctx.color_fn, &ctx.config.scene);
        });
        let frame = frames.fetch_add(1, Ordering::Relaxed);
        log::trace!(target: "vis", "[frame {}] cells={}", frame, cells);
    }
}

pub(crate) fn apply_input<S: Surface>(surface: &mut S, camera: &mut CameraState, input: FrameInput) {
    if input.look_held {
        surface.free_look(camera);
    }
    if input.reset_pressed {
        camera.reset_target();
        log::debug!(target: "vis", "camera target reset");
    }
}
