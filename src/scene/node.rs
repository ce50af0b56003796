use std::borrow::Cow;

use glam::Affine3A;

use crate::models::Shape;
use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A scene graph node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: handle of the owning node (`None` for root nodes)
/// - `children`: owned child handles, in insertion order
///
/// A node is exclusively owned by its parent. Removing a node from the
/// scene destroys its whole subtree.
///
/// # Transform
///
/// Each node has a [`Transform`] with a local position and Euler rotation.
/// The world matrix is the composition of every ancestor's local matrix with
/// the node's own, evaluated root to leaf.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: Cow<'static, str>,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,

    /// Solid volume carried by this node, if any. Grouping nodes have none.
    pub shape: Option<Shape>,

    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            shape: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// World matrix as of the last [`Scene::update_matrix_world`](crate::scene::Scene::update_matrix_world).
    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
