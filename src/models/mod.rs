//! Parametric Composition
//!
//! Every model is a pure function from its declared dimensions to a
//! [`ModelNode`] tree. The same parameters always produce the same tree.
//!
//! - [`Panel`]: a single rectangular solid, the atomic part
//! - Box: bottom plate plus four walls from one thickness
//! - Shelf: three tilted tiers, each hosting up to two boxes
//! - Robot: body, four wheels and a two-segment arm
//! - Warehouse: floor, back wall, a row of shelves and a robot
//!
//! Builders validate before producing anything, so a rejected parameter
//! never yields a partially built model.
//!
//! ```rust,ignore
//! use depot::models::{Dimensions, ModelKind};
//!
//! let warehouse = ModelKind::Warehouse.build(Dimensions::new(2000.0, 150.0, 2000.0, 5.0))?;
//! let spawned = scene.instantiate(&warehouse, None);
//! ```

pub mod panel;
pub mod part;
pub mod robot;
pub mod shelf;
pub mod storage_box;
pub mod warehouse;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::panel::ensure_positive;

pub use panel::Panel;
pub use part::{Anchor, ModelNode, Shape};
pub use robot::{RobotParams, build_robot};
pub use shelf::{BoxPlacement, BoxSide, ShelfLayout, build_shelf, build_shelf_with_layout};
pub use storage_box::{box_panels, build_box};
pub use warehouse::build_warehouse;

/// Axes marker drawn next to every model.
pub fn build_axes(size: f32) -> Result<ModelNode> {
    ensure_positive("axes", "size", size)?;
    Ok(ModelNode::solid("Axes", Shape::Axes { size }))
}

/// Declared size of a composite model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub thickness: f32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: f32, height: f32, depth: f32, thickness: f32) -> Self {
        Self {
            width,
            height,
            depth,
            thickness,
        }
    }

    /// Rejects any non-positive or non-finite parameter.
    pub fn validate(&self, model: &'static str) -> Result<()> {
        ensure_positive(model, "width", self.width)?;
        ensure_positive(model, "height", self.height)?;
        ensure_positive(model, "depth", self.depth)?;
        ensure_positive(model, "thickness", self.thickness)?;
        Ok(())
    }
}

/// The closed set of composition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModelKind {
    Box,
    Shelf,
    Robot,
    Warehouse,
}

impl ModelKind {
    /// Runs the composition rule for this kind.
    ///
    /// Robots have no wall thickness; it is ignored for them.
    pub fn build(self, dims: Dimensions) -> Result<ModelNode> {
        match self {
            ModelKind::Box => build_box(dims),
            ModelKind::Shelf => build_shelf(dims),
            ModelKind::Robot => build_robot(RobotParams::new(dims.width, dims.height, dims.depth)),
            ModelKind::Warehouse => build_warehouse(dims),
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Box => "box",
            ModelKind::Shelf => "shelf",
            ModelKind::Robot => "robot",
            ModelKind::Warehouse => "warehouse",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
