//! Demo producer: seeds a cube and then inserts random points.

use bonxai_geom::Rgba;
use bonxai_grid::VoxelGrid;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoSettings {
    pub resolution: f64,
    pub inner_bits: u32,
    pub leaf_bits: u32,
    pub cube_length: f64,
    pub interval_ms: u64,
    pub updates: u64,
    pub area_length: f64,
    pub area_height: f64,
    pub seed: Option<u64>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            inner_bits: bonxai_grid::DEFAULT_INNER_BITS,
            leaf_bits: bonxai_grid::DEFAULT_LEAF_BITS,
            cube_length: 5.0,
            interval_ms: 1000,
            updates: 0,
            area_length: 40.0,
            area_height: 20.0,
            seed: None,
        }
    }
}

impl DemoSettings {
    /// Rejects settings that would leave the random point area empty.
    pub fn validate(&self) -> Result<(), String> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.area_length) {
            return Err(format!("area_length must be positive, got {}", self.area_length));
        }
        if !positive(self.area_height) {
            return Err(format!("area_height must be positive, got {}", self.area_height));
        }
        if !(self.cube_length.is_finite() && self.cube_length >= 0.0) {
            return Err(format!("cube_length must not be negative, got {}", self.cube_length));
        }
        Ok(())
    }
}

/// `[demo]` table of the shared config file.
#[derive(Debug, Default, Deserialize)]
pub struct DemoFile {
    #[serde(default)]
    pub demo: DemoSettings,
}

pub fn cell_color(occupied: &bool) -> Rgba {
    if *occupied {
        Rgba::new(0, 255, 0, 30)
    } else {
        Rgba::TRANSPARENT
    }
}

/// Values `start, start + step, ...` strictly below `end`.
fn steps(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u64..)
        .map(move |i| start + i as f64 * step)
        .take_while(move |v| *v < end)
}

/// Marks a cube standing on z = 0, centred on the z axis, sampled at half
/// the resolution. Returns the number of newly occupied cells.
pub fn seed_cube(grid: &VoxelGrid<bool>, cube_length: f64) -> usize {
    let res = grid.resolution();
    let step = 0.5 * res;
    let mut acc = grid.create_accessor();
    let mut created = 0;
    for x in steps(-0.5 * cube_length, 0.5 * (cube_length + res), step) {
        for y in steps(-0.5 * cube_length, 0.5 * (cube_length + res), step) {
            for z in steps(0.0, cube_length + res, step) {
                if acc.set_value(grid.pos_to_coord(x, y, z), true) {
                    created += 1;
                }
            }
        }
    }
    created
}

pub struct RandomPoints {
    rng: StdRng,
    half_length: f64,
    height: f64,
}

impl RandomPoints {
    pub fn new(settings: &DemoSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            half_length: 0.5 * settings.area_length,
            height: settings.area_height,
        }
    }

    pub fn next_point(&mut self) -> (f64, f64, f64) {
        let x = self.rng.gen_range(-self.half_length..self.half_length);
        let y = self.rng.gen_range(-self.half_length..self.half_length);
        let z = self.rng.gen_range(0.0..self.height);
        (x, y, z)
    }
}
