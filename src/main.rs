mod cli;
mod demo;

use std::error::Error;
use std::fs;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use bonxai_grid::VoxelGrid;
use bonxai_runtime::{VisConfig, Visualiser};
use clap::Parser;

use crate::cli::Args;
use crate::demo::{DemoFile, DemoSettings, RandomPoints};

fn load_config(args: &Args) -> Result<(VisConfig, DemoSettings), Box<dyn Error>> {
    let Some(path) = &args.config else {
        return Ok((VisConfig::default(), DemoSettings::default()));
    };
    let s = fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path.display(), e))?;
    let vis = VisConfig::from_toml_str(&s)?;
    let demo: DemoFile = toml::from_str(&s)?;
    log::info!("loaded config from {}", path.display());
    Ok((vis, demo.demo))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (vis_config, mut settings) = load_config(&args)?;
    args.apply(&mut settings);
    settings.validate()?;

    let grid = Arc::new(VoxelGrid::<bool>::with_bits(
        settings.resolution,
        settings.inner_bits,
        settings.leaf_bits,
    )?);
    let seeded = demo::seed_cube(&grid, settings.cube_length);
    log::info!("seeded cube with {} cells", seeded);

    let mut vis = Visualiser::new(grid.clone(), demo::cell_color).with_config(vis_config);
    vis.start()?;

    let mut points = RandomPoints::new(&settings);
    let mut acc = grid.create_accessor();
    let interval = Duration::from_millis(settings.interval_ms);
    let mut inserted = 0u64;
    while vis.is_running() && (settings.updates == 0 || inserted < settings.updates) {
        let (x, y, z) = points.next_point();
        log::info!("{:.3} {:.3} {:.3}", x, y, z);
        acc.set_value(grid.pos_to_coord(x, y, z), true);
        inserted += 1;
        thread::sleep(interval);
    }

    log::info!(
        "inserted {} points, {} cells occupied, {} frames drawn",
        inserted,
        grid.active_cells_count(),
        vis.frames_rendered()
    );
    vis.stop()?;
    Ok(())
}
