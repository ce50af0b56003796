//! Transform System
//!
//! Propagates local transforms down the node hierarchy. Kept separate from
//! [`Scene`](crate::scene::Scene) so it only borrows the node arena and the
//! root list.

use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Updates world matrices for every tree reachable from `roots`.
///
/// Uses an explicit stack instead of recursion. A node's world matrix is
/// rebuilt when its own local matrix changed or any ancestor's did.
pub fn update_hierarchy_iterative(nodes: &mut SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) {
    // (node, parent world matrix, parent changed)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root in roots.iter().rev() {
        stack.push((root, Affine3A::IDENTITY, false));
    }

    while let Some((handle, parent_world, parent_changed)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };

        let local_changed = node.transform.update_local_matrix();
        let world_needs_update = local_changed || parent_changed;

        if world_needs_update {
            let world = parent_world * node.transform.local_matrix;
            node.transform.set_world_matrix(world);
        }

        let current_world = node.transform.world_matrix;
        for &child in node.children.iter().rev() {
            stack.push((child, current_world, world_needs_update));
        }
    }
}

/// Forces a world matrix refresh of the subtree rooted at `root`.
pub fn update_subtree(nodes: &mut SlotMap<NodeHandle, Node>, root: NodeHandle) {
    let parent_world = match nodes.get(root) {
        Some(node) => node
            .parent
            .and_then(|p| nodes.get(p))
            .map_or(Affine3A::IDENTITY, |p| p.transform.world_matrix),
        None => return,
    };

    let mut stack = vec![(root, parent_world)];
    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get_mut(handle) else {
            continue;
        };
        node.transform.update_local_matrix();
        let world = parent_world * node.transform.local_matrix;
        node.transform.set_world_matrix(world);

        for &child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }
}

/// Composes the world matrix of `handle` on demand by walking its ancestors.
///
/// Reads the public transform fields directly, so the result is correct even
/// when no hierarchy update has run since the last edit.
#[must_use]
pub fn compute_world_matrix(nodes: &SlotMap<NodeHandle, Node>, handle: NodeHandle) -> Option<Affine3A> {
    let mut node = nodes.get(handle)?;
    let mut world = node.transform.compute_local_matrix();

    while let Some(parent) = node.parent {
        node = nodes.get(parent)?;
        world = node.transform.compute_local_matrix() * world;
    }

    Some(world)
}
