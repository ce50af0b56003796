use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::app::input::{Input, MouseButton};
use crate::controls::{ControlHandler, ControlKind, Viewpoint, ensure_distance_range, ensure_setting};
use crate::errors::Result;

const PHI_EPS: f32 = 0.0001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    /// Auto-rotation rate in orbits per minute. 2.0 is one orbit every 30 seconds.
    pub auto_rotate_speed: f32,
    pub center: Vec3,
}

impl OrbitSettings {
    pub fn validate(&self) -> Result<()> {
        ensure_distance_range("orbit", self.min_distance, self.max_distance)?;
        ensure_setting(
            "orbit",
            "damping_factor",
            self.damping_factor,
            (0.0..1.0).contains(&self.damping_factor),
        )
    }
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 20000.0,
            auto_rotate: true,
            auto_rotate_speed: 2.0,
            center: Vec3::ZERO,
        }
    }
}

/// Orbit around a centre point in spherical coordinates.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,

    pub center: Vec3,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,

    rotate_delta: Vec2,
    enabled: bool,
}

impl OrbitControls {
    #[must_use]
    pub fn new(settings: OrbitSettings) -> Self {
        Self {
            rotate_speed: settings.rotate_speed,
            zoom_speed: settings.zoom_speed,
            pan_speed: settings.pan_speed,
            damping_factor: settings.damping_factor,
            enable_damping: settings.enable_damping,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            auto_rotate: settings.auto_rotate,
            auto_rotate_speed: settings.auto_rotate_speed,

            center: settings.center,
            radius: settings.min_distance,
            theta: 0.0,
            phi: FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
            enabled: false,
        }
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Azimuth advanced by auto-rotation over `dt` seconds.
    #[must_use]
    pub fn auto_rotation_angle(&self, dt: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * dt
    }

    /// Unit offset from the centre for the current angles.
    fn direction(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Re-derives radius and angles from the viewpoint's position.
    fn sync_from(&mut self, viewpoint: &Viewpoint) {
        let offset = viewpoint.position() - self.center;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        self.radius = radius.clamp(self.min_distance, self.max_distance);
        self.theta = offset.x.atan2(offset.z);
        self.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
    }
}

impl ControlHandler for OrbitControls {
    fn kind(&self) -> ControlKind {
        ControlKind::Orbit
    }

    fn enable(&mut self, viewpoint: &mut Viewpoint) {
        self.sync_from(viewpoint);
        self.rotate_delta = Vec2::ZERO;
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.rotate_delta = Vec2::ZERO;
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self, viewpoint: &mut Viewpoint, input: &Input, dt: f32) {
        let screen_height = input.safe_screen_size().y;
        let cursor_delta = input.mouse_delta();

        if input.get_mouse_button(MouseButton::Left) {
            let rotate_per_pixel = 2.0 * PI / screen_height;
            self.rotate_delta -= cursor_delta * rotate_per_pixel * self.rotate_speed;
        }

        if self.auto_rotate {
            self.theta -= self.auto_rotation_angle(dt);
        }

        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let delta_apply = self.rotate_delta * (1.0 - retention);

            self.theta += delta_apply.x;
            self.phi += delta_apply.y;

            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.phi = self.phi.clamp(PHI_EPS, PI - PHI_EPS);
        self.theta = self.theta.rem_euclid(TAU);

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(scroll.abs());
            if scroll > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.get_mouse_button(MouseButton::Right) {
            let pixels_to_world = viewpoint.visible_height(self.radius) / screen_height;

            let forward = -self.direction();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            self.center += (right * -cursor_delta.x + up * cursor_delta.y) * pixels_to_world * self.pan_speed;
        }

        viewpoint.transform.position = self.center + self.direction() * self.radius;
        viewpoint.look_at(self.center);
    }
}
