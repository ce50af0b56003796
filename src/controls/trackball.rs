use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::app::input::{Input, MouseButton};
use crate::controls::{ControlHandler, ControlKind, Viewpoint, ensure_distance_range, ensure_setting};
use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackballSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Stop immediately when the pointer stops instead of coasting.
    pub static_moving: bool,
    /// Fraction of rotation lost per tick when coasting.
    pub dynamic_damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub target: Vec3,
}

impl TrackballSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_distance_range("trackball", self.min_distance, self.max_distance)?;
        ensure_setting(
            "trackball",
            "dynamic_damping_factor",
            self.dynamic_damping_factor,
            (0.0..1.0).contains(&self.dynamic_damping_factor),
        )
    }
}

impl Default for TrackballSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 5.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            static_moving: true,
            dynamic_damping_factor: 0.2,
            min_distance: 1.0,
            max_distance: 20000.0,
            target: Vec3::ZERO,
        }
    }
}

/// Free rotation around a target; the camera's up vector rotates with it.
#[derive(Debug, Clone)]
pub struct TrackballControls {
    pub settings: TrackballSettings,
    pub target: Vec3,

    up: Vec3,
    last_axis: Vec3,
    last_angle: f32,
    enabled: bool,
}

impl TrackballControls {
    #[must_use]
    pub fn new(settings: TrackballSettings) -> Self {
        Self {
            target: settings.target,
            settings,
            up: Vec3::Y,
            last_axis: Vec3::ZERO,
            last_angle: 0.0,
            enabled: false,
        }
    }

    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    fn rotate(&mut self, eye: Vec3, input: &Input) -> Vec3 {
        let delta = input.mouse_delta();
        let dragging = input.get_mouse_button(MouseButton::Left) && delta != glam::Vec2::ZERO;

        if dragging {
            let movement = delta / input.safe_screen_size().y;
            let angle = movement.length() * self.settings.rotate_speed;

            let eye_dir = eye.normalize_or_zero();
            let sideways = self.up.cross(eye_dir).normalize_or_zero();
            let move_dir = self.up * -movement.y + sideways * movement.x;
            let axis = move_dir.cross(eye).normalize_or_zero();

            if axis != Vec3::ZERO {
                self.last_axis = axis;
                self.last_angle = angle;
                return self.apply_rotation(eye, axis, angle);
            }
        } else if !self.settings.static_moving && self.last_angle > f32::EPSILON {
            self.last_angle *= (1.0 - self.settings.dynamic_damping_factor).sqrt();
            return self.apply_rotation(eye, self.last_axis, self.last_angle);
        }

        self.last_angle = 0.0;
        eye
    }

    fn apply_rotation(&mut self, eye: Vec3, axis: Vec3, angle: f32) -> Vec3 {
        let q = Quat::from_axis_angle(axis, angle);
        self.up = (q * self.up).normalize_or(Vec3::Y);
        q * eye
    }
}

impl ControlHandler for TrackballControls {
    fn kind(&self) -> ControlKind {
        ControlKind::Trackball
    }

    fn enable(&mut self, viewpoint: &mut Viewpoint) {
        self.up = viewpoint.transform.orientation() * Vec3::Y;
        self.last_angle = 0.0;
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.last_angle = 0.0;
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self, viewpoint: &mut Viewpoint, input: &Input, _dt: f32) {
        let mut eye = viewpoint.position() - self.target;
        eye = self.rotate(eye, input);

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let factor = (1.0 - scroll * self.settings.zoom_speed * 0.05).max(0.1);
            eye *= factor;
        }
        let distance = eye.length();
        if distance > f32::EPSILON {
            let clamped = distance.clamp(self.settings.min_distance, self.settings.max_distance);
            eye *= clamped / distance;
        }

        if input.get_mouse_button(MouseButton::Right) {
            let delta = input.mouse_delta();
            let sideways = eye.cross(self.up).normalize_or_zero();
            let pan = (sideways * -delta.x + self.up * delta.y) * eye.length() * self.settings.pan_speed
                / input.safe_screen_size().y;
            self.target += pan;
        }

        viewpoint.transform.position = self.target + eye;
        viewpoint.transform.look_at(self.target, self.up);
    }
}
