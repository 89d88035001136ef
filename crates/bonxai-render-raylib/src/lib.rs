//! Raylib-based rendering of a live voxel grid: frame assembly, camera and window surface.
// Unsafe is required for the rlgl matrix stack used by the axis arrows.

pub mod camera;
pub mod frame;
pub mod surface;
pub mod target;

pub use camera::CameraState;
pub use frame::{AxisStyle, SceneStyle, draw_arrow, draw_axes, render_frame, render_grid};
pub use surface::{FrameInput, RaylibSurface, RaylibTarget, Surface, SurfaceConfig, SurfaceError};
pub use target::{DrawCall, DrawList, DrawTarget};

pub mod conv {
    use bonxai_geom::{Rgba, Vec3};
    use raylib::prelude::{Camera3D, Color, Vector3};

    use crate::camera::CameraState;

    pub fn vec3_to_rl(v: Vec3) -> Vector3 {
        Vector3::new(v.x, v.y, v.z)
    }

    pub fn vec3_from_rl(v: Vector3) -> Vec3 {
        Vec3 {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    pub fn rgba_to_rl(c: Rgba) -> Color {
        Color::new(c.r, c.g, c.b, c.a)
    }

    pub fn camera_to_rl(cam: &CameraState) -> Camera3D {
        Camera3D::perspective(
            vec3_to_rl(cam.position),
            vec3_to_rl(cam.target),
            vec3_to_rl(cam.up),
            cam.fovy,
        )
    }

    pub fn camera_from_rl(cam: &Camera3D, out: &mut CameraState) {
        out.position = vec3_from_rl(cam.position);
        out.target = vec3_from_rl(cam.target);
        out.up = vec3_from_rl(cam.up);
        out.fovy = cam.fovy;
    }
}
