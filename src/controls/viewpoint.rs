//! Camera pose plus projection.
//!
//! The viewpoint is the only state the navigation handlers mutate. It knows
//! nothing about rendering; a host reads `view_matrix`/`projection_matrix`.

use glam::{Affine3A, Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for PerspectiveSettings {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 300.0,
            far: 5000.0,
            position: Vec3::new(0.0, 0.0, 2000.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthographicSettings {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for OrthographicSettings {
    fn default() -> Self {
        Self {
            left: -300.0,
            right: 500.0,
            top: 400.0,
            bottom: -400.0,
            near: 0.1,
            far: 10000.0,
            position: Vec3::new(0.0, 0.0, 5000.0),
        }
    }
}

/// Presets used when the workbench switches camera type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub perspective: PerspectiveSettings,
    pub orthographic: OrthographicSettings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov.to_radians(), aspect.max(f32::EPSILON), near, far),
            Self::Orthographic {
                left,
                right,
                top,
                bottom,
                near,
                far,
            } => Mat4::orthographic_rh(left, right, bottom, top, near, far),
        }
    }
}

/// The tracked camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewpoint {
    pub transform: Transform,
    pub projection: Projection,
}

impl Viewpoint {
    /// Perspective camera at the preset position, looking at the origin.
    #[must_use]
    pub fn perspective(settings: &PerspectiveSettings, aspect: f32) -> Self {
        let mut viewpoint = Self {
            transform: Transform::from_position(settings.position),
            projection: Projection::Perspective {
                fov: settings.fov,
                aspect,
                near: settings.near,
                far: settings.far,
            },
        };
        viewpoint.look_at(Vec3::ZERO);
        viewpoint
    }

    /// Orthographic camera at the preset position, looking at the origin.
    #[must_use]
    pub fn orthographic(settings: &OrthographicSettings) -> Self {
        let mut viewpoint = Self {
            transform: Transform::from_position(settings.position),
            projection: Projection::Orthographic {
                left: settings.left,
                right: settings.right,
                top: settings.top,
                bottom: settings.bottom,
                near: settings.near,
                far: settings.far,
            },
        };
        viewpoint.look_at(Vec3::ZERO);
        viewpoint
    }

    #[must_use]
    pub fn is_perspective(&self) -> bool {
        matches!(self.projection, Projection::Perspective { .. })
    }

    /// Human-readable camera type.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self.projection {
            Projection::Perspective { .. } => "Perspective",
            Projection::Orthographic { .. } => "Orthographic",
        }
    }

    /// Vertical field of view in degrees, for perspective cameras.
    #[must_use]
    pub fn fov(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fov, .. } => Some(fov),
            Projection::Orthographic { .. } => None,
        }
    }

    /// Height of the visible world slice at `distance` from the camera.
    #[must_use]
    pub fn visible_height(&self, distance: f32) -> f32 {
        match self.projection {
            Projection::Perspective { fov, .. } => 2.0 * distance * (fov.to_radians() / 2.0).tan(),
            Projection::Orthographic { top, bottom, .. } => top - bottom,
        }
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target, Vec3::Y);
    }

    /// Resize hook. Orthographic frusta keep their fixed extents.
    pub fn set_aspect(&mut self, new_aspect: f32) {
        if let Projection::Perspective { aspect, .. } = &mut self.projection {
            *aspect = new_aspect;
        }
    }

    #[must_use]
    pub fn world_matrix(&self) -> Affine3A {
        self.transform.compute_local_matrix()
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from(self.world_matrix().inverse())
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
