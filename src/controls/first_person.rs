use std::f32::consts::PI;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::app::input::{Input, Key, MouseButton};
use crate::controls::{ControlHandler, ControlKind, Viewpoint, ensure_setting};
use crate::errors::Result;

/// Latitude is kept clear of the poles.
const MAX_LATITUDE: f32 = 85.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirstPersonSettings {
    pub look_speed: f32,
    pub movement_speed: f32,
    /// Initial longitude in degrees.
    pub lon: f32,
    /// Initial latitude in degrees.
    pub lat: f32,
    pub look_vertical: bool,
    pub constrain_vertical: bool,
    /// Polar angle range (radians) the latitude is mapped into when constrained.
    pub vertical_min: f32,
    pub vertical_max: f32,
    /// Keep the camera at its current height while moving.
    pub no_fly: bool,
    pub active_look: bool,
    pub auto_forward: bool,
}

impl FirstPersonSettings {
    /// The vertical range must be non-empty; the look rate divides by its width.
    pub fn validate(&self) -> Result<()> {
        ensure_setting("first_person", "vertical_min", self.vertical_min, true)?;
        ensure_setting(
            "first_person",
            "vertical_max",
            self.vertical_max,
            self.vertical_max > self.vertical_min,
        )
    }
}

impl Default for FirstPersonSettings {
    fn default() -> Self {
        Self {
            look_speed: 0.1,
            movement_speed: 200.0,
            lon: 150.0,
            lat: -120.0,
            look_vertical: true,
            constrain_vertical: true,
            vertical_min: 1.0,
            vertical_max: 2.0,
            no_fly: true,
            active_look: true,
            auto_forward: false,
        }
    }
}

/// Mouse look driven by the cursor's offset from the screen centre, plus walking.
#[derive(Debug, Clone)]
pub struct FirstPersonControls {
    pub settings: FirstPersonSettings,
    pub lon: f32,
    pub lat: f32,
    enabled: bool,
}

impl FirstPersonControls {
    #[must_use]
    pub fn new(settings: FirstPersonSettings) -> Self {
        Self {
            lon: settings.lon,
            lat: settings.lat,
            settings,
            enabled: false,
        }
    }

    /// Look direction for the current longitude/latitude.
    #[must_use]
    pub fn look_direction(&self) -> Vec3 {
        let lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let mut phi = (90.0 - lat).to_radians();
        let theta = self.lon.to_radians();

        if self.settings.constrain_vertical {
            phi = map_linear(phi, 0.0, PI, self.settings.vertical_min, self.settings.vertical_max);
        }

        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
    }

    fn movement(&self, input: &Input) -> Vec3 {
        let mut forward = input.axis(Key::W, Key::S) + input.axis(Key::ArrowUp, Key::ArrowDown);
        if self.settings.active_look {
            forward += f32::from(u8::from(input.get_mouse_button(MouseButton::Left)))
                - f32::from(u8::from(input.get_mouse_button(MouseButton::Right)));
        }
        if self.settings.auto_forward {
            forward += 1.0;
        }
        let strafe = input.axis(Key::D, Key::A) + input.axis(Key::ArrowRight, Key::ArrowLeft);
        let lift = if self.settings.no_fly {
            0.0
        } else {
            input.axis(Key::R, Key::F)
        };
        Vec3::new(strafe.clamp(-1.0, 1.0), lift, -forward.clamp(-1.0, 1.0))
    }
}

fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

impl ControlHandler for FirstPersonControls {
    fn kind(&self) -> ControlKind {
        ControlKind::FirstPerson
    }

    /// Starts from the configured look angles on every enable.
    fn enable(&mut self, viewpoint: &mut Viewpoint) {
        self.lon = self.settings.lon;
        self.lat = self.settings.lat;
        let target = viewpoint.position() + self.look_direction();
        viewpoint.look_at(target);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self, viewpoint: &mut Viewpoint, input: &Input, dt: f32) {
        let step = self.movement(input) * self.settings.movement_speed * dt;
        if step != Vec3::ZERO {
            let height = viewpoint.position().y;
            let local = viewpoint.transform.orientation() * step;
            viewpoint.transform.position += local;
            if self.settings.no_fly {
                viewpoint.transform.position.y = height;
            }
        }

        if self.settings.active_look
            && let Some(cursor) = input.cursor()
        {
            let pointer: Vec2 = cursor - input.safe_screen_size() / 2.0;
            let look_step = dt * self.settings.look_speed;
            let vertical_ratio = if self.settings.constrain_vertical {
                PI / (self.settings.vertical_max - self.settings.vertical_min)
            } else {
                1.0
            };

            self.lon -= pointer.x * look_step;
            if self.settings.look_vertical {
                self.lat -= pointer.y * look_step * vertical_ratio;
            }
            self.lat = self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        }

        let target = viewpoint.position() + self.look_direction();
        viewpoint.look_at(target);
    }
}
