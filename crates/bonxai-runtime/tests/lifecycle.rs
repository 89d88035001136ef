use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use bonxai_geom::{CoordT, Rgba, Vec3};
use bonxai_grid::VoxelGrid;
use bonxai_render_raylib::{
    CameraState, DrawList, DrawTarget, FrameInput, Surface, SurfaceConfig, SurfaceError,
};
use bonxai_runtime::{LifecycleState, VisConfig, VisError, Visualiser};

#[derive(Clone, Debug, Default)]
struct Probe {
    opened: usize,
    closed: usize,
    frames: usize,
    last_cubes: Vec<(Vec3, Vec3, Rgba)>,
    cameras: Vec<CameraState>,
}

// Keyed by window title so tests running in parallel do not share state.
static PROBES: LazyLock<Mutex<HashMap<String, Probe>>> = LazyLock::new(Default::default);

fn probe(title: &str) -> Probe {
    PROBES
        .lock()
        .unwrap()
        .get(title)
        .cloned()
        .unwrap_or_default()
}

fn with_probe(title: &str, f: impl FnOnce(&mut Probe)) {
    let mut map = PROBES.lock().unwrap();
    f(map.entry(title.to_string()).or_default());
}

fn config(title: &str) -> VisConfig {
    let mut c = VisConfig::default();
    c.window.title = title.to_string();
    c
}

fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(2));
    }
    cond()
}

fn green(v: &bool) -> (u8, u8, u8, u8) {
    if *v { (0, 255, 0, 30) } else { (0, 0, 0, 0) }
}

/// Never closes on its own; scripted input per frame index.
struct Headless {
    title: String,
    frame: usize,
    close_after: Option<usize>,
}

impl Headless {
    fn script(&self) -> FrameInput {
        match (self.title.as_str(), self.frame) {
            (t, 1) if t.starts_with("input") => FrameInput {
                look_held: true,
                reset_pressed: false,
            },
            (t, 2) if t.starts_with("input") => FrameInput {
                look_held: false,
                reset_pressed: true,
            },
            _ => FrameInput::default(),
        }
    }
}

impl Surface for Headless {
    fn open(config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        with_probe(&config.title, |p| p.opened += 1);
        let close_after = config.title.starts_with("closing").then_some(3);
        Ok(Self {
            title: config.title.clone(),
            frame: 0,
            close_after,
        })
    }

    fn should_close(&mut self) -> bool {
        self.close_after.is_some_and(|n| self.frame >= n)
    }

    fn poll_input(&mut self) -> FrameInput {
        self.script()
    }

    fn free_look(&mut self, camera: &mut CameraState) {
        camera.position.x += 1.0;
        camera.target.y += 1.0;
    }

    fn draw_frame(
        &mut self,
        camera: &CameraState,
        _background: Rgba,
        scene: &mut dyn FnMut(&mut dyn DrawTarget),
    ) {
        let mut list = DrawList::new();
        scene(&mut list);
        self.frame += 1;
        let cubes: Vec<_> = list.cubes().collect();
        with_probe(&self.title, |p| {
            p.frames += 1;
            p.last_cubes = cubes;
            p.cameras.push(*camera);
        });
        thread::sleep(Duration::from_millis(1));
    }
}

impl Drop for Headless {
    fn drop(&mut self) {
        with_probe(&self.title, |p| p.closed += 1);
    }
}

struct NoDisplay;

impl Surface for NoDisplay {
    fn open(_config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        Err(SurfaceError::Init("no display".to_string()))
    }
    fn should_close(&mut self) -> bool {
        true
    }
    fn poll_input(&mut self) -> FrameInput {
        FrameInput::default()
    }
    fn free_look(&mut self, _camera: &mut CameraState) {}
    fn draw_frame(
        &mut self,
        _camera: &CameraState,
        _background: Rgba,
        _scene: &mut dyn FnMut(&mut dyn DrawTarget),
    ) {
    }
}

fn one_cell_grid() -> Arc<VoxelGrid<bool>> {
    let grid = Arc::new(VoxelGrid::with_bits(1.0, 2, 2).unwrap());
    grid.set_value(CoordT::new(3, 3, 3), true);
    grid
}

#[test]
fn start_runs_frames_and_drop_joins() {
    let title = "basic";
    let mut vis =
        Visualiser::<bool, Headless>::with_surface(one_cell_grid(), green).with_config(config(title));
    assert_eq!(vis.state(), LifecycleState::Idle);
    vis.start().unwrap();
    assert_eq!(vis.state(), LifecycleState::Running);
    assert!(wait_for(|| vis.frames_rendered() >= 3));

    let p = probe(title);
    assert_eq!(p.opened, 1);
    assert_eq!(
        p.last_cubes,
        vec![(
            Vec3::new(3.0, 3.0, -3.0),
            Vec3::new(1.0, 1.0, 1.0),
            Rgba::new(0, 255, 0, 30)
        )]
    );

    drop(vis);
    let p = probe(title);
    assert_eq!(p.closed, 1);
    let frames = p.frames;
    thread::sleep(Duration::from_millis(20));
    assert_eq!(probe(title).frames, frames);
}

#[test]
fn second_start_is_rejected() {
    let title = "double";
    let mut vis =
        Visualiser::<bool, Headless>::with_surface(one_cell_grid(), green).with_config(config(title));
    vis.start().unwrap();
    assert!(matches!(vis.start(), Err(VisError::AlreadyStarted)));
    assert_eq!(probe(title).opened, 1);
    vis.stop().unwrap();
    assert_eq!(vis.state(), LifecycleState::Stopped);
    assert!(matches!(vis.start(), Err(VisError::AlreadyStarted)));
    assert_eq!(probe(title).closed, 1);
}

#[test]
fn stop_is_idempotent() {
    let title = "stop-twice";
    let mut vis =
        Visualiser::<bool, Headless>::with_surface(one_cell_grid(), green).with_config(config(title));
    vis.stop().unwrap();
    assert_eq!(vis.state(), LifecycleState::Idle);
    vis.start().unwrap();
    vis.stop().unwrap();
    vis.stop().unwrap();
    assert_eq!(probe(title).closed, 1);
}

#[test]
fn surface_failure_is_reported_from_start() {
    let mut vis = Visualiser::<bool, NoDisplay>::with_surface(one_cell_grid(), green);
    match vis.start() {
        Err(VisError::Surface(SurfaceError::Init(msg))) => assert_eq!(msg, "no display"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(vis.state(), LifecycleState::Stopped);
    assert!(!vis.is_running());
    assert_eq!(vis.frames_rendered(), 0);
}

#[test]
fn closing_the_window_ends_the_loop() {
    let title = "closing";
    let mut vis =
        Visualiser::<bool, Headless>::with_surface(one_cell_grid(), green).with_config(config(title));
    vis.start().unwrap();
    assert!(wait_for(|| vis.state() == LifecycleState::Stopped));
    assert_eq!(vis.frames_rendered(), 3);
    let p = probe(title);
    assert_eq!(p.closed, 1);
    vis.stop().unwrap();
}

#[test]
fn pointer_moves_camera_and_reset_key_recentres_target() {
    let title = "input";
    let mut cfg = config(title);
    cfg.camera.target = [2.0, 0.0, 0.0];
    let mut vis =
        Visualiser::<bool, Headless>::with_surface(one_cell_grid(), green).with_config(cfg);
    vis.start().unwrap();
    assert!(wait_for(|| probe(title).cameras.len() >= 3));
    vis.stop().unwrap();

    let cams = probe(title).cameras;
    // frame 0: untouched
    assert_eq!(cams[0].position, Vec3::new(10.0, 10.0, 10.0));
    assert_eq!(cams[0].target, Vec3::new(2.0, 0.0, 0.0));
    // frame 1: free look applied
    assert_eq!(cams[1].position, Vec3::new(11.0, 10.0, 10.0));
    assert_eq!(cams[1].target, Vec3::new(2.0, 1.0, 0.0));
    // frame 2: target back at origin, position kept
    assert_eq!(cams[2].position, Vec3::new(11.0, 10.0, 10.0));
    assert_eq!(cams[2].target, Vec3::ZERO);
    assert_eq!(cams[2].fovy, 45.0);
}

#[test]
fn cells_inserted_while_running_become_visible() {
    let title = "live";
    let grid = one_cell_grid();
    let mut vis =
        Visualiser::<bool, Headless>::with_surface(grid.clone(), green).with_config(config(title));
    vis.start().unwrap();

    let mut acc = grid.create_accessor();
    for x in 0..50 {
        acc.set_value(CoordT::new(x, -x, 100), x % 2 == 0);
    }
    assert!(wait_for(|| probe(title).last_cubes.len() == 51));
    let cubes = probe(title).last_cubes;
    let transparent = cubes.iter().filter(|(_, _, c)| c.a == 0).count();
    assert_eq!(transparent, 25);
    drop(vis);
    assert_eq!(probe(title).closed, 1);
}
