//! Live visualiser: owns a background render thread that draws a shared
//! [`VoxelGrid`] while other threads keep inserting into it.
#![forbid(unsafe_code)]

mod config;
mod render_loop;

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use bonxai_geom::Rgba;
use bonxai_grid::VoxelGrid;
use bonxai_render_raylib::{RaylibSurface, Surface, SurfaceError};
use thiserror::Error;

pub use config::{CameraConfig, ConfigError, VisConfig, WindowConfig};

use render_loop::LoopContext;

pub type ColorFn<T> = Arc<dyn Fn(&T) -> Rgba + Send + Sync>;

#[derive(Debug, Error)]
pub enum VisError {
    #[error("visualiser was already started")]
    AlreadyStarted,
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("spawning render thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),
    #[error("render thread exited before reporting readiness")]
    ReadySignalLost,
    #[error("render thread panicked")]
    RenderThreadPanicked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Running,
    Stopped,
}

/// Background visualiser for a shared grid.
///
/// `start` may be called once. Dropping the visualiser stops the render loop
/// and joins its thread before returning.
pub struct Visualiser<T, S = RaylibSurface> {
    grid: Arc<VoxelGrid<T>>,
    color_fn: ColorFn<T>,
    config: VisConfig,
    state: LifecycleState,
    running: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
    _surface: PhantomData<fn() -> S>,
}

impl<T> Visualiser<T, RaylibSurface>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<F, C>(grid: Arc<VoxelGrid<T>>, color_fn: F) -> Self
    where
        F: Fn(&T) -> C + Send + Sync + 'static,
        C: Into<Rgba>,
    {
        Self::with_surface(grid, color_fn)
    }
}

impl<T, S> Visualiser<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: Surface + 'static,
{
    /// Same as [`Visualiser::new`] with an explicit surface type.
    pub fn with_surface<F, C>(grid: Arc<VoxelGrid<T>>, color_fn: F) -> Self
    where
        F: Fn(&T) -> C + Send + Sync + 'static,
        C: Into<Rgba>,
    {
        Self {
            grid,
            color_fn: Arc::new(move |v: &T| -> Rgba { color_fn(v).into() }),
            config: VisConfig::default(),
            state: LifecycleState::Idle,
            running: Arc::new(AtomicBool::new(false)),
            frames: Arc::new(AtomicU64::new(0)),
            handle: None,
            _surface: PhantomData,
        }
    }

    pub fn with_config(mut self, config: VisConfig) -> Self {
        self.config = config;
        self
    }

    /// Opens the surface on a new thread and starts the frame loop. Returns
    /// once the surface is open, or with the error that prevented it.
    pub fn start(&mut self) -> Result<(), VisError> {
        if self.state != LifecycleState::Idle {
            return Err(VisError::AlreadyStarted);
        }
        self.running.store(true, Ordering::Release);

        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<Result<(), SurfaceError>>(1);
        let ctx = LoopContext {
            grid: self.grid.clone(),
            color_fn: self.color_fn.clone(),
            config: self.config.clone(),
        };
        let running = self.running.clone();
        let frames = self.frames.clone();
        let spawned = thread::Builder::new()
            .name("bonxai-vis".to_string())
            .spawn(move || {
                let mut surface = match S::open(&ctx.config.surface_config()) {
                    Ok(s) => s,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                render_loop::run(&mut surface, &ctx, &running, &frames);
                running.store(false, Ordering::Release);
                drop(surface);
                log::info!(
                    target: "vis",
                    "render loop exited after {} frames",
                    frames.load(Ordering::Relaxed)
                );
            });
        let handle = match spawned {
            Ok(h) => h,
            Err(e) => {
                self.running.store(false, Ordering::Release);
                self.state = LifecycleState::Stopped;
                return Err(VisError::ThreadSpawn(e));
            }
        };

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.handle = Some(handle);
                self.state = LifecycleState::Running;
                log::info!(target: "vis", "visualiser started");
                Ok(())
            }
            Ok(Err(e)) => {
                self.fail_start(handle);
                log::error!(target: "vis", "{}", e);
                Err(VisError::Surface(e))
            }
            Err(_) => {
                self.fail_start(handle);
                Err(VisError::ReadySignalLost)
            }
        }
    }

    fn fail_start(&mut self, handle: JoinHandle<()>) {
        self.running.store(false, Ordering::Release);
        let _ = handle.join();
        self.state = LifecycleState::Stopped;
    }

    /// Requests the loop to exit and waits for the render thread. Stopping an
    /// idle or already stopped visualiser does nothing.
    pub fn stop(&mut self) -> Result<(), VisError> {
        self.running.store(false, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let joined = handle.join();
        self.state = LifecycleState::Stopped;
        log::info!(target: "vis", "visualiser stopped");
        joined.map_err(|_| VisError::RenderThreadPanicked)
    }

    /// A loop that ended because the window was closed reads as `Stopped`.
    pub fn state(&self) -> LifecycleState {
        match (&self.state, &self.handle) {
            (LifecycleState::Running, Some(h)) if h.is_finished() => LifecycleState::Stopped,
            (state, _) => *state,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == LifecycleState::Running
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

impl<T, S> Drop for Visualiser<T, S> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!(target: "vis", "render thread panicked during shutdown");
            }
        }
    }
}
