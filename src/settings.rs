//! Viewer Settings
//!
//! Tunables of the demo world and its controllers. Every struct implements
//! [`Default`] with the values the viewer ships with, and deserializes from
//! JSON with missing fields falling back to those defaults.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scenery::settings::ViewerSettings;
//!
//! let settings = ViewerSettings {
//!     clip_dir: "assets/clips".into(),
//!     ..Default::default()
//! };
//!
//! // Or from a file, overriding only what it names
//! let settings = ViewerSettings::load("viewer.json")?;
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

// ---------------------------------------------------------------------------
// ViewerSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Directory holding persisted animation clips.
    pub clip_dir: PathBuf,
    /// Upper bound applied to frame deltas, in seconds.
    pub max_dt: f32,
    pub town: TownSettings,
    pub robot: RobotSettings,
    pub camera: CameraSettings,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            clip_dir: PathBuf::from("res/animations"),
            max_dt: 0.1,
            town: TownSettings::default(),
            robot: RobotSettings::default(),
            camera: CameraSettings::default(),
        }
    }
}

impl ViewerSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        log::info!("Loaded viewer settings from {}", path.display());
        Ok(settings)
    }

    /// Clamps a raw frame delta to `[0, max_dt]`.
    #[must_use]
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_dt)
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Procedural house grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TownSettings {
    /// Number of rows (along X).
    pub width: i32,
    /// Houses per row (along Z).
    pub height: i32,
    /// Distance between neighbouring houses.
    pub separation: f32,
    /// Give every house a small random tilt.
    pub tilt_houses: bool,
}

impl Default for TownSettings {
    fn default() -> Self {
        Self {
            width: 2,
            height: 2,
            separation: 10.0,
            tilt_houses: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    /// Walking speed in units per second.
    pub speed: f32,
    /// Torso and head turn rate in degrees per second.
    pub rotation_speed: f32,
    /// Maximum head yaw either way, in degrees.
    pub head_yaw_limit: f32,
}

impl Default for RobotSettings {
    fn default() -> Self {
        Self {
            speed: 35.0,
            rotation_speed: 80.0,
            head_yaw_limit: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub start_position: [f32; 3],
    /// Degrees; `-90` looks down `-Z`.
    pub yaw: f32,
    pub pitch: f32,
    /// Fraction of the remaining distance the follow camera covers per second.
    pub follow_rate: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            start_position: [0.0, 16.0, 44.0],
            yaw: -90.0,
            pitch: -20.0,
            follow_rate: 5.0,
        }
    }
}

impl CameraSettings {
    #[must_use]
    pub fn start_position(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }

    /// Unit view direction for the configured yaw and pitch.
    #[must_use]
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings =
            ViewerSettings::from_json_str(r#"{ "town": { "width": 4 }, "robot": { "speed": 10.0 } }"#)
                .unwrap();
        assert_eq!(settings.town.width, 4);
        assert_eq!(settings.town.height, 2);
        assert!((settings.robot.speed - 10.0).abs() < 1e-6);
        assert!((settings.robot.rotation_speed - 80.0).abs() < 1e-6);
        assert_eq!(settings.clip_dir, PathBuf::from("res/animations"));
    }

    #[test]
    fn frame_delta_is_clamped_to_max_dt() {
        let settings = ViewerSettings::from_json_str(r#"{ "max_dt": 0.05 }"#).unwrap();
        assert_eq!(settings.clamp_dt(0.016), 0.016);
        assert_eq!(settings.clamp_dt(0.5), 0.05);
        assert_eq!(settings.clamp_dt(-1.0), 0.0);
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let err = ViewerSettings::from_json_str("{ town: }").unwrap_err();
        assert!(matches!(err, crate::errors::SceneryError::Settings(_)));
    }

    #[test]
    fn default_camera_looks_down_and_forward() {
        let front = CameraSettings::default().front();
        assert!(front.z < -0.9);
        assert!(front.y < 0.0);
        assert!((front.length() - 1.0).abs() < 1e-5);
    }
}
