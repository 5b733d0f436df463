//! JSON scene descriptions.
//!
//! Every field has a default, so an empty object `{}` yields the demo scene:
//! a 20x20 mirror at z = -5, a unit sphere at (-2, -2, -1), a laser fired
//! from the world origin and a range indicator of radius 3.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glam::Vec3;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    camera::Camera,
    error::ConfigError,
    frame::{FrameDriver, FrameSettings, DEFAULT_BOUNCE_LENGTH},
    mesh::Mesh,
    plane::Plane,
    proximity::RangeCheck,
    scene::Scene,
    sphere::Sphere,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CameraConfig {
    fn default() -> CameraConfig {
        CameraConfig {
            position: Vec3::new(5.0, 5.0, 20.0),
            look_at: Vec3::ZERO,
            fov: 50.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SurfaceConfig {
    Plane {
        center: Vec3,
        normal: Vec3,
        #[serde(default)]
        half_size: Option<f32>,
    },
    Sphere {
        center: Vec3,
        radius: f32,
    },
    Mesh {
        path: PathBuf,
        #[serde(default)]
        double_sided: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub surfaces: Vec<SurfaceConfig>,
    pub range: RangeCheck,
    pub emitter: Option<Vec3>,
    pub bounce_length: f32,
}

impl Default for SceneConfig {
    fn default() -> SceneConfig {
        SceneConfig {
            camera: CameraConfig::default(),
            surfaces: vec![
                SurfaceConfig::Plane {
                    center: Vec3::new(0.0, 0.0, -5.0),
                    normal: Vec3::Z,
                    half_size: Some(10.0),
                },
                SurfaceConfig::Sphere {
                    center: Vec3::new(-2.0, -2.0, -1.0),
                    radius: 1.0,
                },
            ],
            range: RangeCheck::default(),
            emitter: Some(Vec3::ZERO),
            bounce_length: DEFAULT_BOUNCE_LENGTH,
        }
    }
}

impl SceneConfig {
    /// Reads a scene file. Relative mesh paths are resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<SceneConfig, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = SceneConfig::from_json(&text)?;

        if let Some(base) = path.parent() {
            for surface in &mut config.surfaces {
                if let SurfaceConfig::Mesh { path: mesh_path, .. } = surface {
                    if mesh_path.is_relative() {
                        *mesh_path = base.join(&*mesh_path);
                    }
                }
            }
        }

        info!("loaded scene {} ({} surfaces)", path.display(), config.surfaces.len());
        return Ok(config);
    }

    pub fn from_json(text: &str) -> Result<SceneConfig, ConfigError> {
        let config: SceneConfig = serde_json::from_str(text)?;
        return Ok(config);
    }

    pub fn camera(&self) -> Camera {
        let c = &self.camera;
        return Camera::from_lookat(c.position, c.look_at, c.fov, c.width, c.height);
    }

    pub fn settings(&self) -> FrameSettings {
        return FrameSettings::new(self.bounce_length, self.emitter);
    }

    pub fn build_scene(&self) -> Result<Scene, ConfigError> {
        let mut scene = Scene::new();
        for surface in &self.surfaces {
            match surface {
                SurfaceConfig::Plane { center, normal, half_size } => {
                    scene.add(Box::new(Plane::new(*center, *normal, *half_size)?));
                },
                SurfaceConfig::Sphere { center, radius } => {
                    if *radius < 0.0 {
                        warn!("sphere radius {} is negative, clamping to 0", radius);
                    }
                    scene.add(Box::new(Sphere::new(*center, *radius)));
                },
                SurfaceConfig::Mesh { path, double_sided } => {
                    scene.add(Box::new(Mesh::load_obj(path, *double_sided)?));
                },
            }
        }
        return Ok(scene);
    }

    pub fn build_driver<H>(&self) -> Result<FrameDriver<H>, ConfigError> {
        let scene = self.build_scene()?;
        return Ok(FrameDriver::new(scene, self.settings(), self.range));
    }
}
