use glam::{Affine3A, Vec3};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::errors::{DepotError, Result};
use crate::models::{Anchor, ModelNode};
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::scene::transform_system;

/// Attachment change observed by whoever displays the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneChange {
    /// `node` (with its subtree) became reachable under `parent`, or as a root.
    Attached {
        node: NodeHandle,
        parent: Option<NodeHandle>,
    },
    /// `node` (with its subtree) was removed from `parent`, or from the roots.
    Detached {
        node: NodeHandle,
        parent: Option<NodeHandle>,
    },
}

/// Result of [`Scene::instantiate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawned {
    pub root: NodeHandle,
    pub anchors: SmallVec<[(Anchor, NodeHandle); 2]>,
}

impl Spawned {
    /// Handle recorded for `anchor` while spawning, if the model had one.
    #[must_use]
    pub fn anchor(&self, anchor: Anchor) -> Option<NodeHandle> {
        self.anchors
            .iter()
            .find_map(|&(a, handle)| (a == anchor).then_some(handle))
    }
}

/// Scene graph container.
///
/// Owns every node in a slot map. Handles are non-owning references: a
/// handle to a removed node simply stops resolving.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    root_nodes: Vec<NodeHandle>,
    changes: Vec<SceneChange>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Creates an empty root node.
    pub fn create_node(&mut self, name: &'static str) -> NodeHandle {
        self.add_node(Node::new(name))
    }

    /// Adds a node as a new root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        self.changes.push(SceneChange::Attached {
            node: handle,
            parent: None,
        });
        handle
    }

    /// Adds a node under an existing parent.
    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> Result<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            return Err(DepotError::InvalidHierarchy(format!(
                "parent {parent:?} is not in the scene"
            )));
        }

        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        self.nodes[parent].children.push(handle);
        self.changes.push(SceneChange::Attached {
            node: handle,
            parent: Some(parent),
        });
        Ok(handle)
    }

    /// Copies a composed model into the scene.
    ///
    /// The parent is checked before anything is inserted, so on error the
    /// scene is untouched. Anchored nodes are reported in [`Spawned::anchors`].
    pub fn instantiate(&mut self, model: &ModelNode, parent: Option<NodeHandle>) -> Result<Spawned> {
        if let Some(p) = parent
            && !self.nodes.contains_key(p)
        {
            return Err(DepotError::InvalidHierarchy(format!(
                "parent {p:?} is not in the scene"
            )));
        }

        let mut anchors = SmallVec::new();
        let root = self.insert_tree(model, parent, &mut anchors);

        match parent {
            Some(p) => self.nodes[p].children.push(root),
            None => self.root_nodes.push(root),
        }
        self.changes.push(SceneChange::Attached { node: root, parent });

        log::debug!(
            "Spawned '{}' ({} nodes, {} anchors)",
            model.name,
            model.node_count(),
            anchors.len()
        );
        Ok(Spawned { root, anchors })
    }

    fn insert_tree(
        &mut self,
        model: &ModelNode,
        parent: Option<NodeHandle>,
        anchors: &mut SmallVec<[(Anchor, NodeHandle); 2]>,
    ) -> NodeHandle {
        let mut node = Node::new(model.name.clone()).with_transform(model.transform.clone());
        node.shape = model.shape;
        node.parent = parent;
        let handle = self.nodes.insert(node);

        if let Some(anchor) = model.anchor {
            anchors.push((anchor, handle));
        }

        for child in &model.children {
            let child_handle = self.insert_tree(child, Some(handle), anchors);
            self.nodes[handle].children.push(child_handle);
        }
        handle
    }

    // ========================================================================
    // Hierarchy edits
    // ========================================================================

    /// Moves `child` (with its subtree) under `parent`.
    ///
    /// Refuses to attach a node to itself or to one of its own descendants.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) -> Result<()> {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return Err(DepotError::InvalidHierarchy("node attached to itself".into()));
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return Err(DepotError::InvalidHierarchy(
                "attach references a node that is not in the scene".into(),
            ));
        }
        if self.is_ancestor(child, parent) {
            return Err(DepotError::InvalidHierarchy(format!(
                "{child:?} is an ancestor of {parent:?}"
            )));
        }

        let old_parent = self.unlink(child);
        self.changes.push(SceneChange::Detached {
            node: child,
            parent: old_parent,
        });

        self.nodes[parent].children.push(child);
        let node = &mut self.nodes[child];
        node.parent = Some(parent);
        node.transform.mark_dirty();
        self.changes.push(SceneChange::Attached {
            node: child,
            parent: Some(parent),
        });
        Ok(())
    }

    /// Detaches `handle` from its parent and destroys its whole subtree.
    ///
    /// Returns `false` if the node was not in the scene.
    pub fn remove_node(&mut self, handle: NodeHandle) -> bool {
        if !self.nodes.contains_key(handle) {
            return false;
        }

        let parent = self.unlink(handle);
        for descendant in self.descendants(handle) {
            self.nodes.remove(descendant);
        }
        self.changes.push(SceneChange::Detached {
            node: handle,
            parent,
        });
        true
    }

    /// Removes every root and everything under it.
    pub fn clear(&mut self) {
        let roots = std::mem::take(&mut self.root_nodes);
        for root in roots {
            for descendant in self.descendants(root) {
                self.nodes.remove(descendant);
            }
            self.changes.push(SceneChange::Detached {
                node: root,
                parent: None,
            });
        }
        log::info!("Scene cleared");
    }

    /// Removes `handle` from its parent's children (or the root list).
    fn unlink(&mut self, handle: NodeHandle) -> Option<NodeHandle> {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(p) {
                    parent_node.children.retain(|&c| c != handle);
                }
            }
            None => self.root_nodes.retain(|&r| r != handle),
        }
        if let Some(node) = self.nodes.get_mut(handle) {
            node.parent = None;
        }
        parent
    }

    /// Whether `ancestor` appears on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.nodes.get(handle).and_then(|n| n.parent);
        }
        false
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn root_nodes(&self) -> &[NodeHandle] {
        &self.root_nodes
    }

    /// `handle` and every node below it, depth-first, parents before children.
    #[must_use]
    pub fn descendants(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![handle];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Refreshes cached world matrices for the whole scene.
    pub fn update_matrix_world(&mut self) {
        transform_system::update_hierarchy_iterative(&mut self.nodes, &self.root_nodes);
    }

    pub fn update_subtree(&mut self, root: NodeHandle) {
        transform_system::update_subtree(&mut self.nodes, root);
    }

    /// World matrix composed from the current local transforms of the
    /// node and all of its ancestors.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Option<Affine3A> {
        transform_system::compute_world_matrix(&self.nodes, handle)
    }

    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        self.world_matrix(handle).map(|m| Vec3::from(m.translation))
    }

    // ========================================================================
    // Change log
    // ========================================================================

    /// Attachment changes recorded since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<SceneChange> {
        std::mem::take(&mut self.changes)
    }

    #[must_use]
    pub fn pending_changes(&self) -> &[SceneChange] {
        &self.changes
    }
}
