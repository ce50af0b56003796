use slotmap::SlotMap;

use crate::animation::AnimatorHandle;
use crate::animation::locomotion::{LocomotionAnimator, TickControl};
use crate::scene::Scene;

/// Animation system.
///
/// Owns every running animator and drives them once per frame. An animator
/// whose tick reports [`TickControl::Stop`] is dropped from the system.
#[derive(Debug, Default)]
pub struct AnimationSystem {
    animators: SlotMap<AnimatorHandle, LocomotionAnimator>,
}

impl AnimationSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, animator: LocomotionAnimator) -> AnimatorHandle {
        self.animators.insert(animator)
    }

    pub fn remove(&mut self, handle: AnimatorHandle) -> Option<LocomotionAnimator> {
        self.animators.remove(handle)
    }

    #[must_use]
    pub fn get(&self, handle: AnimatorHandle) -> Option<&LocomotionAnimator> {
        self.animators.get(handle)
    }

    pub fn get_mut(&mut self, handle: AnimatorHandle) -> Option<&mut LocomotionAnimator> {
        self.animators.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.animators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }

    /// Cancels and drops every animator.
    pub fn clear(&mut self) {
        for (_handle, animator) in &mut self.animators {
            animator.cancel();
        }
        self.animators.clear();
    }

    /// Ticks all animators.
    ///
    /// # Arguments
    /// * `scene` - Scene holding the tracked nodes
    /// * `dt` - Delta time per frame (in seconds)
    pub fn update(&mut self, scene: &mut Scene, dt: f32) {
        self.animators.retain(|handle, animator| {
            let keep = animator.tick(scene, dt) == TickControl::Continue;
            if !keep {
                log::debug!("Animator {handle:?} stopped");
            }
            keep
        });
    }
}
