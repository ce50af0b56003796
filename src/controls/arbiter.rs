use std::any::Any;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::app::input::Input;
use crate::controls::{
    ControlHandler, ControlKind, FirstPersonControls, FirstPersonSettings, FlyControls,
    FlySettings, OrbitControls, OrbitSettings, TrackballControls, TrackballSettings, Viewpoint,
};
use crate::errors::{DepotError, Result};

/// Handler tuning plus the handler enabled at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    /// Handler activated when the workbench starts. `None` starts with no handler.
    pub initial: Option<ControlKind>,
    pub orbit: OrbitSettings,
    pub trackball: TrackballSettings,
    pub first_person: FirstPersonSettings,
    pub fly: FlySettings,
}

impl ControlSettings {
    pub fn validate(&self) -> Result<()> {
        self.orbit.validate()?;
        self.trackball.validate()?;
        self.first_person.validate()
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            initial: Some(ControlKind::Orbit),
            orbit: OrbitSettings::default(),
            trackball: TrackballSettings::default(),
            first_person: FirstPersonSettings::default(),
            fly: FlySettings::default(),
        }
    }
}

/// Exclusive owner of the navigation handlers.
///
/// At most one handler is active. Switching handlers always disables the
/// previous one before the next is enabled, so no two handlers ever hold the
/// viewpoint at the same time.
#[derive(Debug, Default)]
pub struct ControlArbiter {
    handlers: FxHashMap<ControlKind, Box<dyn ControlHandler>>,
    active: Option<ControlKind>,
    viewpoint: Option<Viewpoint>,
}

impl ControlArbiter {
    #[must_use]
    pub fn new(viewpoint: Option<Viewpoint>) -> Self {
        Self {
            handlers: FxHashMap::default(),
            active: None,
            viewpoint,
        }
    }

    /// Arbiter with all four handlers registered and nothing active yet.
    #[must_use]
    pub fn with_default_handlers(settings: &ControlSettings, viewpoint: Viewpoint) -> Self {
        let mut arbiter = Self::new(Some(viewpoint));
        arbiter.register(Box::new(OrbitControls::new(settings.orbit.clone())));
        arbiter.register(Box::new(TrackballControls::new(settings.trackball.clone())));
        arbiter.register(Box::new(FirstPersonControls::new(settings.first_person.clone())));
        arbiter.register(Box::new(FlyControls::new(settings.fly.clone())));
        arbiter
    }

    /// Registers a handler under its own kind, returning the one it replaces.
    ///
    /// Replacing the active handler disables it and leaves nothing active.
    pub fn register(&mut self, handler: Box<dyn ControlHandler>) -> Option<Box<dyn ControlHandler>> {
        let kind = handler.kind();
        let mut previous = self.handlers.insert(kind, handler);
        if self.active == Some(kind) {
            if let Some(old) = previous.as_mut() {
                old.disable();
            }
            self.active = None;
            log::warn!("Active control handler '{kind}' was replaced; no handler is active");
        }
        previous
    }

    /// Makes `kind` the single active handler.
    ///
    /// Activating the already active handler does nothing. Otherwise the
    /// current handler is disabled first, then `kind` is enabled on the
    /// viewpoint. On error nothing changes.
    pub fn activate(&mut self, kind: ControlKind) -> Result<()> {
        if self.active == Some(kind) {
            return Ok(());
        }
        if !self.handlers.contains_key(&kind) {
            log::warn!("No handler registered for '{kind}'");
            return Err(DepotError::HandlerUnavailable(kind));
        }
        let Some(viewpoint) = self.viewpoint.as_mut() else {
            log::warn!("Cannot activate '{kind}': no viewpoint to control");
            return Err(DepotError::NoTrackedEntity(format!(
                "control handler '{kind}' has no viewpoint"
            )));
        };

        if let Some(previous) = self.active.take()
            && let Some(handler) = self.handlers.get_mut(&previous)
        {
            handler.disable();
            log::debug!("Control handler '{previous}' disabled");
        }

        if let Some(handler) = self.handlers.get_mut(&kind) {
            handler.enable(viewpoint);
            self.active = Some(kind);
            log::info!("Control handler '{kind}' active");
        }
        Ok(())
    }

    /// Disables `kind` if it is the active handler. Returns whether it was.
    pub fn deactivate(&mut self, kind: ControlKind) -> bool {
        if self.active != Some(kind) {
            return false;
        }
        self.active = None;
        if let Some(handler) = self.handlers.get_mut(&kind) {
            handler.disable();
        }
        log::info!("Control handler '{kind}' deactivated");
        true
    }

    #[must_use]
    pub fn active(&self) -> Option<ControlKind> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, kind: ControlKind) -> bool {
        self.active == Some(kind)
    }

    #[must_use]
    pub fn is_registered(&self, kind: ControlKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Number of handlers that currently report themselves enabled.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.handlers.values().filter(|h| h.is_enabled()).count()
    }

    /// Feeds one tick of input to the active handler only.
    pub fn update(&mut self, input: &Input, dt: f32) {
        let Some(kind) = self.active else {
            return;
        };
        if let (Some(handler), Some(viewpoint)) =
            (self.handlers.get_mut(&kind), self.viewpoint.as_mut())
        {
            handler.update(viewpoint, input, dt);
        }
    }

    #[must_use]
    pub fn viewpoint(&self) -> Option<&Viewpoint> {
        self.viewpoint.as_ref()
    }

    pub fn viewpoint_mut(&mut self) -> Option<&mut Viewpoint> {
        self.viewpoint.as_mut()
    }

    /// Swaps the controlled viewpoint, returning the old one.
    ///
    /// The active handler stays active: it is disabled on the old viewpoint
    /// and enabled again on the new one.
    pub fn replace_viewpoint(&mut self, viewpoint: Viewpoint) -> Option<Viewpoint> {
        let active = self.active.and_then(|kind| self.handlers.get_mut(&kind));
        if let Some(handler) = active {
            handler.disable();
        }

        let old = self.viewpoint.replace(viewpoint);

        if let Some(kind) = self.active
            && let (Some(handler), Some(viewpoint)) =
                (self.handlers.get_mut(&kind), self.viewpoint.as_mut())
        {
            handler.enable(viewpoint);
            log::debug!("Control handler '{kind}' moved to the new viewpoint");
        }
        old
    }

    /// Typed access to a registered handler.
    #[must_use]
    pub fn handler<T: ControlHandler>(&self, kind: ControlKind) -> Option<&T> {
        let handler: &dyn ControlHandler = &**self.handlers.get(&kind)?;
        let handler: &dyn Any = handler;
        handler.downcast_ref::<T>()
    }

    pub fn handler_mut<T: ControlHandler>(&mut self, kind: ControlKind) -> Option<&mut T> {
        let handler: &mut dyn ControlHandler = &mut **self.handlers.get_mut(&kind)?;
        let handler: &mut dyn Any = handler;
        handler.downcast_mut::<T>()
    }
}
