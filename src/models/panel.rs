//! Parametric panel: the atomic unit every composite is built from.

use std::borrow::Cow;

use glam::Vec3;

use crate::errors::{DepotError, Result};
use crate::models::part::{ModelNode, Shape};

/// A single rectangular solid with a local offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub offset: Vec3,
}

impl Panel {
    /// Creates a panel.
    ///
    /// Zero-sized axes are accepted (a floor plate with no height is a valid
    /// degenerate panel). Negative or non-finite sizes are rejected.
    pub fn new(width: f32, height: f32, depth: f32, offset: Vec3) -> Result<Self> {
        ensure_non_negative("panel", "width", width)?;
        ensure_non_negative("panel", "height", height)?;
        ensure_non_negative("panel", "depth", depth)?;
        Ok(Self {
            width,
            height,
            depth,
            offset,
        })
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        Shape::Cuboid {
            width: self.width,
            height: self.height,
            depth: self.depth,
        }
    }

    /// Minimum corner in the parent's frame (ignores any rotation of the node).
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.offset - self.shape().half_extents()
    }

    /// Maximum corner in the parent's frame (ignores any rotation of the node).
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.offset + self.shape().half_extents()
    }

    #[must_use]
    pub fn into_node(self, name: impl Into<Cow<'static, str>>) -> ModelNode {
        ModelNode::solid(name, self.shape()).at(self.offset)
    }
}

/// Rejects zero, negative and non-finite caller parameters.
pub(crate) fn ensure_positive(model: &'static str, parameter: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DepotError::InvalidDimension {
            model,
            parameter,
            value,
        })
    }
}

/// Rejects negative and non-finite derived sizes.
pub(crate) fn ensure_non_negative(model: &'static str, parameter: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DepotError::InvalidDimension {
            model,
            parameter,
            value,
        })
    }
}
