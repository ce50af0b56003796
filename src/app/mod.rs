//! Workbench
//!
//! The frame coordinator a host application drives. It owns the scene, the
//! control arbiter, the patrol animator and the input snapshot, and exposes
//! the user-facing actions (draw a preset, clean, switch camera, toggle a
//! control, start or pause the patrol) as plain methods.
//!
//! One frame is:
//!
//! 1. the host injects events into [`Workbench::input`]
//! 2. [`Workbench::frame`] (or [`Workbench::tick`]) runs the active control
//!    handler, advances animations and refreshes world matrices
//! 3. the host drains [`Scene::drain_changes`] and draws with the viewpoint

pub mod input;

use self::input::Input;

use crate::animation::{AnimationSystem, AnimatorHandle, LocomotionAnimator, LocomotionState};
use crate::config::Settings;
use crate::controls::{ControlArbiter, ControlKind, OrbitControls, Viewpoint};
use crate::errors::{DepotError, Result};
use crate::models::{Anchor, Dimensions, ModelKind, build_axes};
use crate::scene::{NodeHandle, Scene, Spawned};
use crate::utils::Timer;

pub struct Workbench {
    pub settings: Settings,
    pub scene: Scene,
    pub input: Input,

    controls: ControlArbiter,
    animations: AnimationSystem,
    timer: Timer,
    aspect: f32,

    current_model: Option<ModelKind>,
    robot: Option<NodeHandle>,
    patrol: Option<AnimatorHandle>,
}

impl Workbench {
    /// Builds an empty workbench with a perspective camera and the initial handler active.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;

        let aspect = 1.0;
        let viewpoint = Viewpoint::perspective(&settings.camera.perspective, aspect);
        let mut controls = ControlArbiter::with_default_handlers(&settings.controls, viewpoint);
        if let Some(initial) = settings.controls.initial {
            controls.activate(initial)?;
        }

        Ok(Self {
            settings,
            scene: Scene::new(),
            input: Input::new(),
            controls,
            animations: AnimationSystem::new(),
            timer: Timer::new(),
            aspect,
            current_model: None,
            robot: None,
            patrol: None,
        })
    }

    // ========================================================================
    // Draw actions
    // ========================================================================

    pub fn draw_box(&mut self) -> Result<Spawned> {
        self.draw(ModelKind::Box, self.settings.presets.storage_box)
    }

    pub fn draw_shelf(&mut self) -> Result<Spawned> {
        self.draw(ModelKind::Shelf, self.settings.presets.shelf)
    }

    pub fn draw_warehouse(&mut self) -> Result<Spawned> {
        self.draw(ModelKind::Warehouse, self.settings.presets.warehouse)
    }

    /// Replaces the scene content with a freshly built model and an axes marker.
    ///
    /// Both are built before the scene is touched, so a rejected dimension
    /// leaves the current content in place.
    pub fn draw(&mut self, kind: ModelKind, dims: Dimensions) -> Result<Spawned> {
        let model = kind.build(dims)?;
        let axes = build_axes(self.settings.axes_helper_size)?;

        self.clean_scene();
        let spawned = self.scene.instantiate(&model, None)?;
        self.scene.instantiate(&axes, None)?;
        self.scene.update_matrix_world();

        self.current_model = Some(kind);
        if let Some(robot) = spawned.anchor(Anchor::Robot) {
            self.robot = Some(robot);
            let animator = LocomotionAnimator::new(self.settings.patrol).tracking(robot);
            self.patrol = Some(self.animations.add(animator));
        }

        log::info!("Drew {kind} ({} nodes)", self.scene.node_count());
        Ok(spawned)
    }

    /// Removes everything from the scene and stops any patrol.
    pub fn clean_scene(&mut self) {
        self.animations.clear();
        self.patrol = None;
        self.robot = None;
        self.current_model = None;
        self.scene.clear();
    }

    #[must_use]
    pub fn current_model(&self) -> Option<ModelKind> {
        self.current_model
    }

    #[must_use]
    pub fn robot(&self) -> Option<NodeHandle> {
        self.robot
    }

    // ========================================================================
    // Camera
    // ========================================================================

    /// Toggles between the perspective and orthographic presets.
    ///
    /// The active control handler moves over to the new camera.
    pub fn switch_camera(&mut self) -> &'static str {
        let is_perspective = self.controls.viewpoint().is_none_or(Viewpoint::is_perspective);
        let next = if is_perspective {
            Viewpoint::orthographic(&self.settings.camera.orthographic)
        } else {
            Viewpoint::perspective(&self.settings.camera.perspective, self.aspect)
        };
        let label = next.label();
        self.controls.replace_viewpoint(next);
        log::info!("Camera switched to {label}");
        label
    }

    #[must_use]
    pub fn camera_label(&self) -> &'static str {
        self.controls.viewpoint().map_or("None", Viewpoint::label)
    }

    #[must_use]
    pub fn viewpoint(&self) -> Option<&Viewpoint> {
        self.controls.viewpoint()
    }

    /// Window resize hook.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.input.inject_resize(width, height);
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        if let Some(viewpoint) = self.controls.viewpoint_mut() {
            viewpoint.set_aspect(self.aspect);
        }
    }

    // ========================================================================
    // Controls
    // ========================================================================

    /// Checkbox semantics: checking a control makes it the only active one,
    /// unchecking it only has an effect if it is the active one.
    pub fn set_control(&mut self, kind: ControlKind, enabled: bool) -> Result<()> {
        if enabled {
            self.controls.activate(kind)
        } else {
            self.controls.deactivate(kind);
            Ok(())
        }
    }

    pub fn set_orbit_auto_rotate(&mut self, enabled: bool) -> Result<()> {
        let orbit = self
            .controls
            .handler_mut::<OrbitControls>(ControlKind::Orbit)
            .ok_or(DepotError::HandlerUnavailable(ControlKind::Orbit))?;
        orbit.set_auto_rotate(enabled);
        Ok(())
    }

    #[must_use]
    pub fn controls(&self) -> &ControlArbiter {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ControlArbiter {
        &mut self.controls
    }

    // ========================================================================
    // Patrol
    // ========================================================================

    /// Starts the robot patrol, or pauses/resumes a running one.
    pub fn toggle_patrol(&mut self) -> Result<()> {
        let Some(robot) = self.robot.filter(|&r| self.scene.contains(r)) else {
            log::warn!("No robot in the scene to patrol");
            return Err(DepotError::NoTrackedEntity("no robot in the scene".into()));
        };

        let handle = match self.patrol.filter(|&h| self.animations.get(h).is_some()) {
            Some(handle) => handle,
            None => {
                let animator = LocomotionAnimator::new(self.settings.patrol).tracking(robot);
                let handle = self.animations.add(animator);
                self.patrol = Some(handle);
                handle
            }
        };

        match self.animations.get_mut(handle) {
            Some(animator) => animator.toggle(&self.scene),
            None => Err(DepotError::NoTrackedEntity("patrol animator missing".into())),
        }
    }

    #[must_use]
    pub fn patrol(&self) -> Option<&LocomotionAnimator> {
        self.patrol.and_then(|h| self.animations.get(h))
    }

    #[must_use]
    pub fn patrol_state(&self) -> Option<LocomotionState> {
        self.patrol().map(LocomotionAnimator::state)
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advances one frame by `dt` seconds.
    pub fn frame(&mut self, dt: f32) {
        self.controls.update(&self.input, dt);
        self.animations.update(&mut self.scene, dt);
        self.scene.update_matrix_world();
        self.input.start_frame();
    }

    /// Advances one frame using the wall clock.
    pub fn tick(&mut self) {
        self.timer.tick();
        self.frame(self.timer.dt_seconds());
    }

    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}
