//! Scene assembly: ground grid, axis arrows, one cube per occupied cell.

use bonxai_geom::{Rgba, to_vis_frame};
use bonxai_grid::VoxelGrid;
use serde::Deserialize;

use crate::target::DrawTarget;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisStyle {
    pub shaft_radius: f32,
    pub shaft_length: f32,
    pub tip_top_radius: f32,
    pub tip_bottom_radius: f32,
    pub tip_length: f32,
    pub slices: i32,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            shaft_radius: 0.07,
            shaft_length: 1.0,
            tip_top_radius: 0.01,
            tip_bottom_radius: 0.15,
            tip_length: 0.2,
            slices: 8,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneStyle {
    pub grid_slices: i32,
    pub grid_spacing: f32,
    pub axes: AxisStyle,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            grid_slices: 100,
            grid_spacing: 1.0,
            axes: AxisStyle::default(),
        }
    }
}

/// Draws the full scene; returns the number of cells drawn.
pub fn render_frame<T: Clone>(
    target: &mut dyn DrawTarget,
    grid: &VoxelGrid<T>,
    color_fn: &dyn Fn(&T) -> Rgba,
    style: &SceneStyle,
) -> usize {
    target.draw_grid(style.grid_slices, style.grid_spacing);
    draw_axes(target, &style.axes);
    render_grid(target, grid, color_fn)
}

/// One cube of side `resolution` per occupied cell. Transparent colours are
/// still drawn.
pub fn render_grid<T: Clone>(
    target: &mut dyn DrawTarget,
    grid: &VoxelGrid<T>,
    color_fn: &dyn Fn(&T) -> Rgba,
) -> usize {
    let side = grid.resolution() as f32;
    let mut drawn = 0usize;
    grid.for_each_cell(|value, coord| {
        let pos = grid.coord_to_pos(coord);
        let center = to_vis_frame(pos.x as f32, pos.y as f32, pos.z as f32);
        target.draw_cube(center, side, side, side, color_fn(value));
        drawn += 1;
    });
    drawn
}

/// Red/green/blue arrows along grid x/y/z. Arrows are modelled along display
/// +Y (grid z) and rotated into place.
pub fn draw_axes(target: &mut dyn DrawTarget, style: &AxisStyle) {
    target.push_rotation(90.0, to_vis_frame(0.0, 1.0, 0.0));
    draw_arrow(target, style, Rgba::RED);
    target.pop_transform();

    target.push_rotation(90.0, to_vis_frame(-1.0, 0.0, 0.0));
    draw_arrow(target, style, Rgba::GREEN);
    target.pop_transform();

    draw_arrow(target, style, Rgba::BLUE);
}

pub fn draw_arrow(target: &mut dyn DrawTarget, style: &AxisStyle, color: Rgba) {
    target.draw_cylinder(
        to_vis_frame(0.0, 0.0, 0.0),
        style.shaft_radius,
        style.shaft_radius,
        style.shaft_length,
        style.slices,
        color,
    );
    target.draw_cylinder(
        to_vis_frame(0.0, 0.0, style.shaft_length),
        style.tip_top_radius,
        style.tip_bottom_radius,
        style.tip_length,
        style.slices,
        color,
    );
}
