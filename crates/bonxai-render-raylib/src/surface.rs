//! Display surface seam and its raylib implementation.

use std::panic::{self, AssertUnwindSafe};

use bonxai_geom::Rgba;
use raylib::prelude::*;
use thiserror::Error;

use crate::camera::CameraState;
use crate::conv;
use crate::target::DrawTarget;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to open display surface: {0}")]
    Init(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            title: "BonxaiVisualiser".to_string(),
            target_fps: 30,
        }
    }
}

/// Input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Primary pointer button held: camera follows pointer motion.
    pub look_held: bool,
    /// Reset key pressed this frame.
    pub reset_pressed: bool,
}

/// A window plus graphics context. Opened and used on one thread only; the
/// surface is closed when dropped.
pub trait Surface: Sized {
    fn open(config: &SurfaceConfig) -> Result<Self, SurfaceError>;
    fn should_close(&mut self) -> bool;
    fn poll_input(&mut self) -> FrameInput;
    /// Free-look update of `camera` from this frame's pointer motion.
    fn free_look(&mut self, camera: &mut CameraState);
    /// Clears to `background`, runs `scene` in 3D mode, presents and waits
    /// for the next frame slot.
    fn draw_frame(
        &mut self,
        camera: &CameraState,
        background: Rgba,
        scene: &mut dyn FnMut(&mut dyn DrawTarget),
    );
}

pub struct RaylibSurface {
    rl: RaylibHandle,
    thread: RaylibThread,
}

impl Surface for RaylibSurface {
    fn open(config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        // raylib-rs reports init failures (including a second live window) by panicking.
        let opened = panic::catch_unwind(AssertUnwindSafe(|| {
            let (mut rl, thread) = raylib::init()
                .size(config.width, config.height)
                .title(&config.title)
                .build();
            rl.set_target_fps(config.target_fps);
            (rl, thread)
        }));
        match opened {
            Ok((rl, thread)) => {
                log::info!(
                    target: "surface",
                    "opened {}x{} window '{}' at {} fps",
                    config.width,
                    config.height,
                    config.title,
                    config.target_fps
                );
                Ok(Self { rl, thread })
            }
            Err(payload) => {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "raylib initialisation panicked".to_string());
                Err(SurfaceError::Init(msg))
            }
        }
    }

    fn should_close(&mut self) -> bool {
        self.rl.window_should_close()
    }

    fn poll_input(&mut self) -> FrameInput {
        FrameInput {
            look_held: self.rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT),
            reset_pressed: self.rl.is_key_pressed(KeyboardKey::KEY_Z),
        }
    }

    fn free_look(&mut self, camera: &mut CameraState) {
        let mut cam = conv::camera_to_rl(camera);
        self.rl.update_camera(&mut cam, CameraMode::CAMERA_FREE);
        conv::camera_from_rl(&cam, camera);
    }

    fn draw_frame(
        &mut self,
        camera: &CameraState,
        background: Rgba,
        scene: &mut dyn FnMut(&mut dyn DrawTarget),
    ) {
        let cam = conv::camera_to_rl(camera);
        let mut d = self.rl.begin_drawing(&self.thread);
        d.clear_background(conv::rgba_to_rl(background));
        let mut d3 = d.begin_mode3D(cam);
        let mut target = RaylibTarget::new(&mut d3);
        scene(&mut target);
    }
}

impl Drop for RaylibSurface {
    fn drop(&mut self) {
        log::info!(target: "surface", "closing window");
    }
}

/// Issues draw calls on an active raylib 3D mode.
pub struct RaylibTarget<'a, D: RaylibDraw3D> {
    d3: &'a mut D,
    depth: usize,
}

impl<'a, D: RaylibDraw3D> RaylibTarget<'a, D> {
    pub fn new(d3: &'a mut D) -> Self {
        Self { d3, depth: 0 }
    }
}

impl<D: RaylibDraw3D> DrawTarget for RaylibTarget<'_, D> {
    fn draw_grid(&mut self, slices: i32, spacing: f32) {
        self.d3.draw_grid(slices, spacing);
    }

    fn draw_cube(&mut self, center: bonxai_geom::Vec3, width: f32, height: f32, length: f32, color: Rgba) {
        self.d3.draw_cube(
            conv::vec3_to_rl(center),
            width,
            height,
            length,
            conv::rgba_to_rl(color),
        );
    }

    fn draw_cylinder(
        &mut self,
        base: bonxai_geom::Vec3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Rgba,
    ) {
        self.d3.draw_cylinder(
            conv::vec3_to_rl(base),
            radius_top,
            radius_bottom,
            height,
            slices,
            conv::rgba_to_rl(color),
        );
    }

    fn push_rotation(&mut self, angle_deg: f32, axis: bonxai_geom::Vec3) {
        unsafe {
            raylib::ffi::rlPushMatrix();
            raylib::ffi::rlRotatef(angle_deg, axis.x, axis.y, axis.z);
        }
        self.depth += 1;
    }

    fn pop_transform(&mut self) {
        if self.depth == 0 {
            log::warn!(target: "surface", "pop_transform without matching push");
            return;
        }
        unsafe {
            raylib::ffi::rlPopMatrix();
        }
        self.depth -= 1;
    }
}

impl<D: RaylibDraw3D> Drop for RaylibTarget<'_, D> {
    fn drop(&mut self) {
        // Leave the matrix stack balanced for EndMode3D.
        while self.depth > 0 {
            unsafe {
                raylib::ffi::rlPopMatrix();
            }
            self.depth -= 1;
        }
    }
}
