//! Per-frame parameter block
//!
//! Everything the shading core reads lives here. A frame's parameters are built
//! (or loaded from JSON) once, validated, and then shared read-only by every pixel.

mod background;
mod black_hole;
mod camera;

pub use background::{Background, BackgroundPattern};
pub use black_hole::{AccretionDisk, BlackHole};
pub use camera::Camera;

use crate::math3d::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to access scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed scene JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid camera: {0}")]
    InvalidCamera(String),
    #[error("invalid disk basis: {0}")]
    InvalidDisk(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("render target must have a non-zero resolution")]
    ZeroResolution,
    #[error("unknown background pattern '{0}' (expected starfield, beams or grid)")]
    UnknownPattern(String),
}

/// Global output controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub brightness: f32,
    /// Apply the sRGB transfer curve when quantizing to 8 bits
    pub srgb_output: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            srgb_output: true,
        }
    }
}

/// Immutable description of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameParams {
    pub camera: Camera,
    pub black_hole: BlackHole,
    pub disk: AccretionDisk,
    pub background: Background,
    pub render: RenderSettings,
}

impl Default for FrameParams {
    /// Reference scene: camera at the origin looking at a non-spinning r_g = 1
    /// black hole 10 units ahead, 60° vertical FOV, 16:9.
    fn default() -> Self {
        let black_hole = BlackHole::default();
        Self {
            camera: Camera::look_at(
                Vec3::zero(),
                black_hole.position,
                Vec3::Y,
                60.0_f32.to_radians(),
                1280,
                720,
            ),
            black_hole,
            disk: AccretionDisk::default(),
            background: Background::default(),
            render: RenderSettings::default(),
        }
    }
}

impl FrameParams {
    pub fn validate(&self) -> Result<(), SceneError> {
        self.camera.validate()?;
        self.black_hole.validate()?;
        self.disk.validate()?;
        if !(self.render.brightness >= 0.0 && self.render.brightness.is_finite()) {
            return Err(SceneError::InvalidGeometry(
                "brightness must be a finite non-negative multiplier".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a scene from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_json(&json)?;
        log::info!(
            "loaded scene {} ({}x{}, pattern {})",
            path.display(),
            params.camera.width,
            params.camera.height,
            params.background.pattern
        );
        Ok(params)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene_is_valid() {
        assert!(FrameParams::default().validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let mut params = FrameParams::default();
        params.background.pattern = BackgroundPattern::Grid;
        params.render.brightness = 1.7;
        let json = params.to_json().unwrap();
        let back = FrameParams::from_json(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params =
            FrameParams::from_json(r#"{ "background": { "pattern": "beams", "tiling": 64.0,
                "angle": 0.0, "spacing": 0.1, "width": 0.02, "intensity": 0.5 } }"#)
                .unwrap();
        assert_eq!(params.background.pattern, BackgroundPattern::Beams);
        assert_eq!(params.camera, FrameParams::default().camera);
    }

    #[test]
    fn test_load_validates() {
        let mut params = FrameParams::default();
        params.camera.up = params.camera.up * 2.0;
        let json = serde_json::to_string(&params).unwrap();
        assert!(matches!(
            FrameParams::from_json(&json),
            Err(SceneError::InvalidCamera(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FrameParams::load("/nonexistent/lensfield/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }
}
