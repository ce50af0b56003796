//! Scene graph module
//!
//! Manages the node hierarchy:
//! - Node: tree node with an exclusively owned, ordered child list
//! - Transform: local position and Euler rotation
//! - Scene: node arena, hierarchy edits and attachment change log
//! - transform_system: root-to-leaf world matrix propagation

pub mod node;
pub mod scene;
pub mod transform;
pub mod transform_system;

pub use node::Node;
pub use scene::{Scene, SceneChange, Spawned};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
