use bonxai_geom::{Rgba, Vec3};

/// 3D drawing primitives the frame builder needs, in display space.
pub trait DrawTarget {
    fn draw_grid(&mut self, slices: i32, spacing: f32);
    fn draw_cube(&mut self, center: Vec3, width: f32, height: f32, length: f32, color: Rgba);
    /// Cylinder standing on `base`, extending `height` along +Y.
    fn draw_cylinder(
        &mut self,
        base: Vec3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Rgba,
    );
    /// Pushes the transform stack and rotates subsequent draws.
    fn push_rotation(&mut self, angle_deg: f32, axis: Vec3);
    fn pop_transform(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Grid {
        slices: i32,
        spacing: f32,
    },
    Cube {
        center: Vec3,
        size: Vec3,
        color: Rgba,
    },
    Cylinder {
        base: Vec3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Rgba,
    },
    PushRotation {
        angle_deg: f32,
        axis: Vec3,
    },
    PopTransform,
}

/// Records draw calls instead of issuing them.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cubes(&self) -> impl Iterator<Item = (Vec3, Vec3, Rgba)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Cube {
                center,
                size,
                color,
            } => Some((*center, *size, *color)),
            _ => None,
        })
    }

    pub fn cylinders(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Cylinder { .. }))
            .count()
    }
}

impl DrawTarget for DrawList {
    fn draw_grid(&mut self, slices: i32, spacing: f32) {
        self.calls.push(DrawCall::Grid { slices, spacing });
    }

    fn draw_cube(&mut self, center: Vec3, width: f32, height: f32, length: f32, color: Rgba) {
        self.calls.push(DrawCall::Cube {
            center,
            size: Vec3::new(width, height, length),
            color,
        });
    }

    fn draw_cylinder(
        &mut self,
        base: Vec3,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        slices: i32,
        color: Rgba,
    ) {
        self.calls.push(DrawCall::Cylinder {
            base,
            radius_top,
            radius_bottom,
            height,
            slices,
            color,
        });
    }

    fn push_rotation(&mut self, angle_deg: f32, axis: Vec3) {
        self.calls.push(DrawCall::PushRotation { angle_deg, axis });
    }

    fn pop_transform(&mut self) {
        self.calls.push(DrawCall::PopTransform);
    }
}
