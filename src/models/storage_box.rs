//! Open-top box: a bottom plate and four walls derived from one thickness.

use glam::Vec3;

use crate::errors::Result;
use crate::models::Dimensions;
use crate::models::panel::Panel;
use crate::models::part::ModelNode;

/// Panel names, in child order.
pub const BOX_PANELS: [&str; 5] = ["Bottom", "Front", "Back", "Left", "Right"];

/// Wall thickness actually used for `dims`.
///
/// Capped at half the width, half the depth and the full height, so opposite
/// walls can meet but never cross and any positive input yields a box.
#[must_use]
pub fn wall_thickness(dims: Dimensions) -> f32 {
    dims.thickness
        .min(dims.width / 2.0)
        .min(dims.depth / 2.0)
        .min(dims.height)
}

/// Computes the five panels of a box, in [`BOX_PANELS`] order.
///
/// Front and back span the full width. Left and right are shortened by
/// twice the thickness so the four walls meet without overlapping at the
/// corners.
pub fn box_panels(dims: Dimensions) -> Result<[Panel; 5]> {
    dims.validate("box")?;
    let Dimensions {
        width: w,
        height: h,
        depth: d,
        ..
    } = dims;

    let t = wall_thickness(dims);
    if t < dims.thickness {
        log::debug!("Box wall thickness {} capped to {t}", dims.thickness);
    }
    let side_depth = d - 2.0 * t;

    Ok([
        Panel::new(w, t, d, Vec3::new(0.0, -h / 2.0 + t / 2.0, 0.0))?,
        Panel::new(w, h, t, Vec3::new(0.0, 0.0, -d / 2.0 + t / 2.0))?,
        Panel::new(w, h, t, Vec3::new(0.0, 0.0, d / 2.0 - t / 2.0))?,
        Panel::new(t, h, side_depth, Vec3::new(-w / 2.0 + t / 2.0, 0.0, 0.0))?,
        Panel::new(t, h, side_depth, Vec3::new(w / 2.0 - t / 2.0, 0.0, 0.0))?,
    ])
}

/// Builds a box model rooted at its centre.
pub fn build_box(dims: Dimensions) -> Result<ModelNode> {
    let panels = box_panels(dims)?;

    let mut root = ModelNode::group("Box");
    for (panel, name) in panels.into_iter().zip(BOX_PANELS) {
        root.add(panel.into_node(name));
    }

    log::debug!(
        "Composed box {}x{}x{} (t = {})",
        dims.width,
        dims.height,
        dims.depth,
        dims.thickness
    );
    Ok(root)
}
