#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod app;
pub mod config;
pub mod controls;
pub mod errors;
pub mod models;
pub mod scene;
pub mod utils;

pub use animation::{AnimationSystem, LocomotionAnimator, LocomotionState, PatrolSettings, TickControl};
pub use app::Workbench;
pub use app::input::{ButtonState, Input, Key, MouseButton};
pub use config::Settings;
pub use controls::{ControlArbiter, ControlHandler, ControlKind, Viewpoint};
pub use errors::{DepotError, Result};
pub use models::{Dimensions, ModelKind, ModelNode};
pub use scene::{Node, NodeHandle, Scene, SceneChange, Transform};
