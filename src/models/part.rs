use std::borrow::Cow;

use glam::Vec3;

use crate::scene::Transform;

/// Solid volume attached to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangular solid centred on the node origin.
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Sphere centred on the node origin.
    Sphere { radius: f32 },
    /// Axis marker of the given length. Has no volume.
    Axes { size: f32 },
}

impl Shape {
    /// Half extents of the local bounding box.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            Shape::Cuboid { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
            Shape::Sphere { radius } => Vec3::splat(radius),
            Shape::Axes { size } => Vec3::splat(size),
        }
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        match *self {
            Shape::Cuboid { width, height, depth } => width * height * depth,
            Shape::Sphere { radius } => 4.0 / 3.0 * std::f32::consts::PI * radius.powi(3),
            Shape::Axes { .. } => 0.0,
        }
    }
}

/// Marks nodes that callers need a direct handle to after spawning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// The single mutation target used to move a robot as a whole.
    Robot,
}

/// A composed model: a pure tree value with exclusively owned children.
///
/// Builders return one of these; nothing touches a [`Scene`](crate::scene::Scene)
/// until [`Scene::instantiate`](crate::scene::Scene::instantiate) copies it in.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelNode {
    pub name: Cow<'static, str>,
    pub transform: Transform,
    pub shape: Option<Shape>,
    pub anchor: Option<Anchor>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    /// Grouping node without a volume of its own.
    #[must_use]
    pub fn group(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            shape: None,
            anchor: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn solid(name: impl Into<Cow<'static, str>>, shape: Shape) -> Self {
        Self {
            shape: Some(shape),
            ..Self::group(name)
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    #[must_use]
    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }

    #[must_use]
    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ModelNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add(&mut self, child: ModelNode) {
        self.children.push(child);
    }

    /// Number of nodes in this tree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ModelNode::node_count).sum::<usize>()
    }

    /// Depth-first search for an anchored node.
    #[must_use]
    pub fn find_anchor(&self, anchor: Anchor) -> Option<&ModelNode> {
        if self.anchor == Some(anchor) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_anchor(anchor))
    }
}
