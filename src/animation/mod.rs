pub mod locomotion;
pub mod system;

pub use locomotion::{
    LocomotionAnimator, LocomotionState, PatrolAxis, PatrolSettings, TickControl, TravelDirection,
};
pub use system::AnimationSystem;

use slotmap::new_key_type;

new_key_type! {
    pub struct AnimatorHandle;
}
