//! Back-and-forth patrol of a single tracked node.
//!
//! The animator is an explicit state machine driven by [`tick`](LocomotionAnimator::tick):
//!
//! ```text
//! Idle --start--> MovingForward --endpoint--> TurningToBackward --pi--> MovingBackward
//!                      ^                                                      |
//!                      +------------ pi <-- TurningToForward <--endpoint-----+
//! ```
//!
//! Pausing parks the machine in `Idle` at the next tick while remembering
//! the interrupted state and its progress; resuming picks up exactly there.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{DepotError, Result};
use crate::scene::{NodeHandle, Scene};

/// Upper bound on phase transitions consumed by one tick.
pub const MAX_TRANSITIONS_PER_TICK: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocomotionState {
    Idle,
    MovingForward,
    TurningToBackward,
    MovingBackward,
    TurningToForward,
}

impl LocomotionState {
    #[must_use]
    pub fn is_moving(self) -> bool {
        matches!(self, Self::MovingForward | Self::MovingBackward)
    }

    #[must_use]
    pub fn is_turning(self) -> bool {
        matches!(self, Self::TurningToBackward | Self::TurningToForward)
    }

    fn next(self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::MovingForward => Self::TurningToBackward,
            Self::TurningToBackward => Self::MovingBackward,
            Self::MovingBackward => Self::TurningToForward,
            Self::TurningToForward => Self::MovingForward,
        }
    }
}

/// Travel direction recorded by the animator; flipped after every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    Forward,
    Backward,
}

impl TravelDirection {
    fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// What the tick driver should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatrolAxis {
    #[default]
    X,
    Y,
    Z,
}

impl PatrolAxis {
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }
}

/// Patrol path and timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolSettings {
    pub axis: PatrolAxis,
    /// Distance covered by each straight leg.
    pub distance: f32,
    /// Seconds per straight leg. A turn takes half of this.
    pub duration: f32,
}

impl PatrolSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.distance.is_finite() && self.distance >= 0.0) {
            return Err(DepotError::InvalidDimension {
                model: "patrol",
                parameter: "distance",
                value: self.distance,
            });
        }
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(DepotError::InvalidDimension {
                model: "patrol",
                parameter: "duration",
                value: self.duration,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn turn_duration(&self) -> f32 {
        self.duration / 2.0
    }
}

impl Default for PatrolSettings {
    fn default() -> Self {
        Self {
            axis: PatrolAxis::X,
            distance: 500.0,
            duration: 4.0,
        }
    }
}

/// Patrol state machine for one tracked node.
///
/// The animator never creates or destroys nodes. It only writes the
/// position and heading of the node it tracks.
#[derive(Debug, Clone)]
pub struct LocomotionAnimator {
    target: Option<NodeHandle>,
    settings: PatrolSettings,

    state: LocomotionState,
    direction: TravelDirection,
    /// Seconds spent in the current phase.
    elapsed: f32,

    // pose captured on entry to the current phase
    from_position: Vec3,
    to_position: Vec3,
    from_heading: f32,

    suspended: Option<LocomotionState>,
    pause_requested: bool,
    live: bool,
}

impl LocomotionAnimator {
    #[must_use]
    pub fn new(settings: PatrolSettings) -> Self {
        Self {
            target: None,
            settings,
            state: LocomotionState::Idle,
            direction: TravelDirection::Forward,
            elapsed: 0.0,
            from_position: Vec3::ZERO,
            to_position: Vec3::ZERO,
            from_heading: 0.0,
            suspended: None,
            pause_requested: false,
            live: true,
        }
    }

    #[must_use]
    pub fn tracking(mut self, target: NodeHandle) -> Self {
        self.target = Some(target);
        self
    }

    /// Replaces the tracked node. Only takes effect on the next `start`.
    pub fn set_target(&mut self, target: Option<NodeHandle>) {
        self.target = target;
    }

    #[must_use]
    pub fn target(&self) -> Option<NodeHandle> {
        self.target
    }

    #[must_use]
    pub fn settings(&self) -> &PatrolSettings {
        &self.settings
    }

    #[must_use]
    pub fn state(&self) -> LocomotionState {
        self.state
    }

    #[must_use]
    pub fn direction(&self) -> TravelDirection {
        self.direction
    }

    /// Progress fraction of the current (or suspended) phase, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let phase = match self.state {
            LocomotionState::Idle => match self.suspended {
                Some(s) => s,
                None => return 0.0,
            },
            s => s,
        };
        (self.elapsed / self.phase_duration(phase)).clamp(0.0, 1.0)
    }

    /// State that `resume` would return to.
    #[must_use]
    pub fn suspended_state(&self) -> Option<LocomotionState> {
        self.suspended
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.suspended.is_some()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state != LocomotionState::Idle
    }

    /// Whether the tick loop for this animator is still alive.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Starts patrolling, or resumes a paused patrol.
    ///
    /// Fails with [`DepotError::NoTrackedEntity`] when no target is set or the
    /// target is no longer in `scene`; the animator then stays `Idle`.
    pub fn start(&mut self, scene: &Scene) -> Result<()> {
        let Some((target, node)) = self
            .target
            .and_then(|t| scene.get_node(t).map(|node| (t, node)))
        else {
            log::warn!("Patrol start ignored: no tracked entity");
            return Err(DepotError::NoTrackedEntity(
                "locomotion animator has no target in the scene".into(),
            ));
        };
        self.settings.validate()?;

        if self.suspended.is_some() {
            self.resume();
            return Ok(());
        }
        if self.is_running() {
            self.pause_requested = false;
            return Ok(());
        }

        let position = node.transform.position;
        let heading = node.transform.yaw();

        self.live = true;
        self.pause_requested = false;
        self.direction = TravelDirection::Forward;
        self.enter(LocomotionState::MovingForward, position, heading);
        log::info!("Patrol started for {target:?}");
        Ok(())
    }

    /// Requests suspension at the next tick boundary.
    pub fn pause(&mut self) {
        if self.is_running() {
            self.pause_requested = true;
        }
    }

    /// Continues from the exact state and progress where the patrol paused.
    pub fn resume(&mut self) {
        self.pause_requested = false;
        if let Some(state) = self.suspended.take() {
            self.state = state;
            log::debug!("Patrol resumed in {state:?}");
        }
    }

    /// Start/pause toggle: pauses a running patrol, otherwise starts or resumes it.
    ///
    /// A second toggle before the next tick withdraws a pending pause.
    pub fn toggle(&mut self, scene: &Scene) -> Result<()> {
        if self.pause_requested {
            self.resume();
            Ok(())
        } else if self.is_running() {
            self.pause();
            Ok(())
        } else {
            self.start(scene)
        }
    }

    /// Clears the live flag. The next tick stops the loop without touching the node.
    pub fn cancel(&mut self) {
        self.live = false;
    }

    /// Advances the patrol by `dt` seconds.
    ///
    /// At most [`MAX_TRANSITIONS_PER_TICK`] phase changes happen per tick;
    /// time left beyond that is dropped.
    pub fn tick(&mut self, scene: &mut Scene, dt: f32) -> TickControl {
        if !self.live {
            return TickControl::Stop;
        }

        if self.pause_requested {
            self.pause_requested = false;
            if self.is_running() {
                self.suspended = Some(self.state);
                self.state = LocomotionState::Idle;
                log::debug!("Patrol suspended at {:.3}", self.progress());
            }
            return TickControl::Continue;
        }

        if !self.is_running() {
            return TickControl::Continue;
        }

        let Some(node) = self.target.and_then(|t| scene.get_node_mut(t)) else {
            log::warn!("Tracked entity vanished; stopping patrol");
            self.live = false;
            self.state = LocomotionState::Idle;
            self.suspended = None;
            return TickControl::Stop;
        };
        let transform = &mut node.transform;

        let mut remaining = dt.max(0.0);
        for transitions in 1..=MAX_TRANSITIONS_PER_TICK {
            let phase_duration = self.phase_duration(self.state);
            self.elapsed += remaining;
            let fraction = (self.elapsed / phase_duration).clamp(0.0, 1.0);

            if self.state.is_moving() {
                transform.position = self.from_position.lerp(self.to_position, fraction);
            } else {
                transform.set_yaw(self.from_heading + PI * fraction);
            }

            if fraction < 1.0 {
                break;
            }

            remaining = self.elapsed - phase_duration;
            let next = self.state.next();
            if self.state.is_turning() {
                transform.set_yaw((self.from_heading + PI).rem_euclid(TAU));
                self.direction = self.direction.flipped();
            }
            if self.state.is_moving() {
                transform.position = self.to_position;
            }
            let (position, heading) = (transform.position, transform.yaw());
            self.enter(next, position, heading);

            if remaining <= 0.0 {
                break;
            }
            if transitions == MAX_TRANSITIONS_PER_TICK {
                log::debug!("Patrol tick dropped {remaining:.3}s after {transitions} transitions");
            }
        }

        TickControl::Continue
    }

    fn phase_duration(&self, state: LocomotionState) -> f32 {
        if state.is_turning() {
            self.settings.turn_duration()
        } else {
            self.settings.duration
        }
    }

    fn enter(&mut self, state: LocomotionState, position: Vec3, heading: f32) {
        self.state = state;
        self.elapsed = 0.0;
        self.from_position = position;
        self.from_heading = heading;
        self.to_position = if state.is_moving() {
            position + self.settings.axis.unit() * self.settings.distance * self.direction.sign()
        } else {
            position
        };
    }
}
