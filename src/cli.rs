use std::path::PathBuf;

use clap::Parser;

use crate::demo::DemoSettings;

/// Live view of a sparse voxel grid that keeps growing in the background.
#[derive(Debug, Parser)]
#[command(name = "bonxai-vis", version)]
pub struct Args {
    /// TOML file with [window]/[camera]/[scene]/[demo] sections
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Voxel edge length in world units
    #[arg(long)]
    pub resolution: Option<f64>,
    #[arg(long)]
    pub inner_bits: Option<u32>,
    #[arg(long)]
    pub leaf_bits: Option<u32>,
    /// Edge length of the seeded cube
    #[arg(long)]
    pub cube_length: Option<f64>,
    /// Delay between random insertions
    #[arg(long)]
    pub interval_ms: Option<u64>,
    /// Number of random insertions; 0 runs until the window closes
    #[arg(long)]
    pub updates: Option<u64>,
    /// Side of the square area random points fall in
    #[arg(long)]
    pub area_length: Option<f64>,
    /// Height of the area random points fall in
    #[arg(long)]
    pub area_height: Option<f64>,
    /// Fixed RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn apply(&self, s: &mut DemoSettings) {
        if let Some(v) = self.resolution {
            s.resolution = v;
        }
        if let Some(v) = self.inner_bits {
            s.inner_bits = v;
        }
        if let Some(v) = self.leaf_bits {
            s.leaf_bits = v;
        }
        if let Some(v) = self.cube_length {
            s.cube_length = v;
        }
        if let Some(v) = self.interval_ms {
            s.interval_ms = v;
        }
        if let Some(v) = self.updates {
            s.updates = v;
        }
        if let Some(v) = self.area_length {
            s.area_length = v;
        }
        if let Some(v) = self.area_height {
            s.area_height = v;
        }
        if self.seed.is_some() {
            s.seed = self.seed;
        }
    }
}
