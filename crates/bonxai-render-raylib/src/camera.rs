use bonxai_geom::Vec3;

/// Perspective camera in display space, independent of the backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::new(10.0, 10.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::UP,
            fovy: 45.0,
        }
    }
}

impl CameraState {
    /// Look back at the origin; position and zoom are kept.
    pub fn reset_target(&mut self) {
        self.target = Vec3::ZERO;
    }
}
