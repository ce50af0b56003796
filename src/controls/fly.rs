use std::f32::consts::PI;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::app::input::{Input, Key, MouseButton};
use crate::controls::{ControlHandler, ControlKind, Viewpoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlySettings {
    pub movement_speed: f32,
    /// Radians per second at full deflection.
    pub roll_speed: f32,
    pub auto_forward: bool,
    /// Only steer with the mouse while a button is held.
    pub drag_to_look: bool,
}

impl Default for FlySettings {
    fn default() -> Self {
        Self {
            movement_speed: 250.0,
            roll_speed: PI / 24.0,
            auto_forward: false,
            drag_to_look: true,
        }
    }
}

/// Six-degree-of-freedom flight in the camera's local frame.
///
/// | Input          | Effect           |
/// |----------------|------------------|
/// | W / S          | forward / back   |
/// | A / D          | left / right     |
/// | R / F          | up / down        |
/// | Q / E          | roll             |
/// | arrows         | pitch and yaw    |
/// | mouse offset   | pitch and yaw    |
#[derive(Debug, Clone)]
pub struct FlyControls {
    pub settings: FlySettings,
    enabled: bool,
}

impl FlyControls {
    #[must_use]
    pub fn new(settings: FlySettings) -> Self {
        Self {
            settings,
            enabled: false,
        }
    }

    /// Local translation direction requested by the keyboard.
    #[must_use]
    pub fn move_vector(&self, input: &Input) -> Vec3 {
        let forward = input.axis(Key::W, Key::S) + f32::from(u8::from(self.settings.auto_forward));
        Vec3::new(
            input.axis(Key::D, Key::A),
            input.axis(Key::R, Key::F),
            -forward.clamp(-1.0, 1.0),
        )
    }

    /// Local pitch/yaw/roll rates requested by keyboard and mouse.
    #[must_use]
    pub fn rotation_vector(&self, input: &Input) -> Vec3 {
        let mut pitch = input.axis(Key::ArrowUp, Key::ArrowDown);
        let mut yaw = input.axis(Key::ArrowLeft, Key::ArrowRight);
        let roll = input.axis(Key::Q, Key::E);

        let looking = !self.settings.drag_to_look
            || input.get_mouse_button(MouseButton::Left)
            || input.get_mouse_button(MouseButton::Right);
        if looking && let Some(cursor) = input.cursor() {
            let half = input.safe_screen_size() / 2.0;
            yaw -= (cursor.x - half.x) / half.x;
            pitch -= (cursor.y - half.y) / half.y;
        }

        Vec3::new(pitch, yaw, roll)
    }
}

impl ControlHandler for FlyControls {
    fn kind(&self) -> ControlKind {
        ControlKind::Fly
    }

    fn enable(&mut self, _viewpoint: &mut Viewpoint) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn update(&mut self, viewpoint: &mut Viewpoint, input: &Input, dt: f32) {
        let orientation = viewpoint.transform.orientation();

        let step = self.move_vector(input) * self.settings.movement_speed * dt;
        viewpoint.transform.position += orientation * step;

        let rotation = self.rotation_vector(input) * self.settings.roll_speed * dt;
        if rotation != Vec3::ZERO {
            let turned = (orientation * Quat::from_scaled_axis(rotation)).normalize();
            viewpoint.transform.set_orientation(turned);
        }
    }
}
