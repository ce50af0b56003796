//! Workbench Settings
//!
//! Every tunable of the workbench in one serde-friendly tree:
//!
//! - [`Presets`]: the dimensions used by the draw actions
//! - [`PatrolSettings`]: the robot's patrol path and timing
//! - [`ControlSettings`]: the initial handler and per-handler tuning
//! - [`CameraSettings`]: the perspective and orthographic camera presets
//!
//! All sections default independently, so a settings file only needs the
//! values it overrides.
//!
//! ```rust,ignore
//! use depot::config::Settings;
//!
//! let settings = Settings::from_json_str(r#"{ "patrol": { "duration": 2.0 } }"#)?;
//! assert_eq!(settings.patrol.distance, 500.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::PatrolSettings;
use crate::controls::{CameraSettings, ControlSettings};
use crate::errors::Result;
use crate::models::Dimensions;

/// Dimensions used by the draw actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presets {
    #[serde(rename = "box")]
    pub storage_box: Dimensions,
    pub shelf: Dimensions,
    pub warehouse: Dimensions,
}

impl Default for Presets {
    fn default() -> Self {
        Self {
            storage_box: Dimensions::new(200.0, 150.0, 200.0, 5.0),
            shelf: Dimensions::new(200.0, 150.0, 200.0, 5.0),
            warehouse: Dimensions::new(2000.0, 150.0, 2000.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub presets: Presets,
    pub patrol: PatrolSettings,
    pub controls: ControlSettings,
    pub camera: CameraSettings,
    /// Length of the axes marker spawned with every drawn model.
    pub axes_helper_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            presets: Presets::default(),
            patrol: PatrolSettings::default(),
            controls: ControlSettings::default(),
            camera: CameraSettings::default(),
            axes_helper_size: 50.0,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loading settings from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects presets that could never be built and control tuning that
    /// the handlers cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.presets.storage_box.validate("box")?;
        self.presets.shelf.validate("shelf")?;
        self.presets.warehouse.validate("warehouse")?;
        self.patrol.validate()?;
        self.controls.validate()?;
        crate::models::build_axes(self.axes_helper_size)?;
        Ok(())
    }
}
