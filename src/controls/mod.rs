//! Interactive Navigation Controls
//!
//! Four mutually exclusive ways of steering the [`Viewpoint`]:
//!
//! - [`OrbitControls`]: orbit around a centre, with optional auto-rotation
//! - [`TrackballControls`]: unconstrained rotation around a target
//! - [`FirstPersonControls`]: mouse look plus WASD walking
//! - [`FlyControls`]: six-degree-of-freedom flight with roll
//!
//! Handlers are owned by the [`ControlArbiter`], which guarantees that at most
//! one of them is enabled at a time and is the only one that receives input.
//!
//! ```rust,ignore
//! use depot::controls::{ControlArbiter, ControlKind};
//!
//! let mut arbiter = ControlArbiter::with_default_handlers(&settings.controls, viewpoint);
//! arbiter.activate(ControlKind::Trackball)?;
//! arbiter.activate(ControlKind::Fly)?; // trackball is disabled first
//! ```

pub mod arbiter;
pub mod first_person;
pub mod fly;
pub mod orbit;
pub mod trackball;
pub mod viewpoint;

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::app::input::Input;
use crate::errors::DepotError;

pub use arbiter::{ControlArbiter, ControlSettings};
pub use first_person::{FirstPersonControls, FirstPersonSettings};
pub use fly::{FlyControls, FlySettings};
pub use orbit::{OrbitControls, OrbitSettings};
pub use trackball::{TrackballControls, TrackballSettings};
pub use viewpoint::{CameraSettings, OrthographicSettings, PerspectiveSettings, Projection, Viewpoint};

/// Identifier of a navigation handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlKind {
    #[default]
    Orbit,
    Trackball,
    FirstPerson,
    Fly,
}

impl ControlKind {
    pub const ALL: [ControlKind; 4] = [Self::Orbit, Self::Trackball, Self::FirstPerson, Self::Fly];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orbit => "orbit",
            Self::Trackball => "trackball",
            Self::FirstPerson => "firstPerson",
            Self::Fly => "fly",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlKind {
    type Err = DepotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DepotError::UnknownControl(s.to_owned()))
    }
}

/// A navigation scheme that steers the viewpoint from input.
///
/// `enable`/`disable` are called only by the [`ControlArbiter`]; `update` is
/// called once per tick, and only on the enabled handler.
pub trait ControlHandler: Any + fmt::Debug {
    fn kind(&self) -> ControlKind;

    /// Takes over the viewpoint. Handlers re-derive their internal state
    /// (orbit angles, look direction...) from its current pose.
    fn enable(&mut self, viewpoint: &mut Viewpoint);

    fn disable(&mut self);

    fn is_enabled(&self) -> bool;

    fn update(&mut self, viewpoint: &mut Viewpoint, input: &Input, dt: f32);
}

/// Fails with [`DepotError::InvalidSetting`] unless `valid` holds for a finite `value`.
pub(crate) fn ensure_setting(
    section: &'static str,
    parameter: &'static str,
    value: f32,
    valid: bool,
) -> crate::errors::Result<()> {
    if value.is_finite() && valid {
        Ok(())
    } else {
        Err(DepotError::InvalidSetting {
            section,
            parameter,
            value,
        })
    }
}

/// Distance limits must be positive and ordered.
pub(crate) fn ensure_distance_range(section: &'static str, min: f32, max: f32) -> crate::errors::Result<()> {
    ensure_setting(section, "min_distance", min, min > 0.0)?;
    ensure_setting(section, "max_distance", max, max >= min)
}
