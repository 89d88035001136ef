use std::fs;
use std::path::{Path, PathBuf};

use bonxai_geom::{Rgba, Vec3};
use bonxai_render_raylib::{CameraState, SceneStyle, SurfaceConfig};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing visualiser config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneStyle,
    pub background: Option<[u8; 4]>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: i32,
    pub height: i32,
    pub title: String,
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let s = SurfaceConfig::default();
        Self {
            width: s.width,
            height: s.height,
            title: s.title,
            target_fps: s.target_fps,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fovy: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let c = CameraState::default();
        Self {
            position: [c.position.x, c.position.y, c.position.z],
            target: [c.target.x, c.target.y, c.target.z],
            up: [c.up.x, c.up.y, c.up.z],
            fovy: c.fovy,
        }
    }
}

fn vec3(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

impl VisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            width: self.window.width,
            height: self.window.height,
            title: self.window.title.clone(),
            target_fps: self.window.target_fps,
        }
    }

    pub fn camera_state(&self) -> CameraState {
        CameraState {
            position: vec3(self.camera.position),
            target: vec3(self.camera.target),
            up: vec3(self.camera.up),
            fovy: self.camera.fovy,
        }
    }

    pub fn background_color(&self) -> Rgba {
        match self.background {
            Some([r, g, b, a]) => Rgba::new(r, g, b, a),
            None => Rgba::DARKGRAY,
        }
    }
}
