//! Three-tier shelf whose tiers fan out and can each hold up to two boxes.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::Dimensions;
use crate::models::panel::Panel;
use crate::models::part::ModelNode;
use crate::models::storage_box::build_box;

/// Tilt of each tier about the depth axis.
pub const TIER_TILT: f32 = PI / 20.0;

/// Gap kept between a box and the tier end, as a fraction of the shelf width.
pub const BOX_MARGIN_RATIO: f32 = 0.1;

/// Tier names, bottom to top, in child order.
pub const TIER_NAMES: [&str; 3] = ["BottomTier", "MiddleTier", "TopTier"];

/// Which end of a tier a box is pushed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSide {
    Left,
    Right,
}

/// Boxes hosted by a single tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoxPlacement {
    Empty,
    Left,
    Right,
    #[default]
    Both,
}

impl BoxPlacement {
    /// Sides occupied by this placement, left first.
    #[must_use]
    pub fn sides(self) -> &'static [BoxSide] {
        match self {
            BoxPlacement::Empty => &[],
            BoxPlacement::Left => &[BoxSide::Left],
            BoxPlacement::Right => &[BoxSide::Right],
            BoxPlacement::Both => &[BoxSide::Left, BoxSide::Right],
        }
    }
}

/// Per-tier box policy, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLayout {
    pub tiers: [BoxPlacement; 3],
}

impl Default for ShelfLayout {
    fn default() -> Self {
        Self {
            tiers: [BoxPlacement::Both, BoxPlacement::Left, BoxPlacement::Right],
        }
    }
}

/// Tier panel before tilting: `2w x t x d`, resting at the shelf bottom.
pub fn tier_panel(dims: Dimensions) -> Result<Panel> {
    dims.validate("shelf")?;
    Panel::new(
        2.0 * dims.width,
        dims.thickness,
        dims.depth,
        Vec3::new(0.0, -dims.height / 2.0 + dims.thickness / 2.0, 0.0),
    )
}

/// Translation and Z tilt applied to each tier, bottom to top.
///
/// The multiples of pi are a fixed visual layout, not a derived quantity.
#[must_use]
pub fn tier_offsets(dims: Dimensions) -> [(Vec3, f32); 3] {
    let w = dims.width;
    let h = dims.height;
    [
        (Vec3::new(w / 4.0, 0.0, 0.0), TIER_TILT),
        (Vec3::new(0.0, h * PI / 4.0, 0.0), TIER_TILT),
        (Vec3::new(w / 4.0, h * PI / 2.0, 0.0), -TIER_TILT),
    ]
}

/// Size of the boxes placed on a tier: half the shelf in every direction.
#[must_use]
pub fn hosted_box_dimensions(dims: Dimensions) -> Dimensions {
    Dimensions::new(dims.width / 2.0, dims.height / 2.0, dims.depth / 2.0, dims.thickness)
}

/// Centre of a hosted box in the tier's frame.
///
/// A tier spans `[-w, w]` laterally; each box is pushed to one end and kept
/// `BOX_MARGIN_RATIO * w` away from it, so the two slots stay disjoint.
#[must_use]
pub fn box_offset(dims: Dimensions, side: BoxSide) -> Vec3 {
    let w = dims.width;
    let box_half_width = hosted_box_dimensions(dims).width / 2.0;
    let inset = w - BOX_MARGIN_RATIO * w - box_half_width;
    let x = match side {
        BoxSide::Left => -inset,
        BoxSide::Right => inset,
    };
    // sits on the tier's top face
    let y = dims.thickness / 2.0 + dims.height / 4.0;
    Vec3::new(x, y, 0.0)
}

/// Builds a shelf with the default [`ShelfLayout`].
pub fn build_shelf(dims: Dimensions) -> Result<ModelNode> {
    build_shelf_with_layout(dims, ShelfLayout::default())
}

pub fn build_shelf_with_layout(dims: Dimensions, layout: ShelfLayout) -> Result<ModelNode> {
    let base = tier_panel(dims)?;
    let box_dims = hosted_box_dimensions(dims);

    let mut root = ModelNode::group("Shelf");
    for ((name, (shift, tilt)), placement) in TIER_NAMES
        .into_iter()
        .zip(tier_offsets(dims))
        .zip(layout.tiers)
    {
        let mut tier = base
            .into_node(name)
            .at(base.offset + shift)
            .rotated(Vec3::new(0.0, 0.0, tilt));

        for &side in placement.sides() {
            let hosted = build_box(box_dims)?.at(box_offset(dims, side));
            tier.add(hosted);
        }
        root.add(tier);
    }

    log::debug!(
        "Composed shelf {}x{}x{} (t = {}) with layout {:?}",
        dims.width,
        dims.height,
        dims.depth,
        dims.thickness,
        layout.tiers
    );
    Ok(root)
}
