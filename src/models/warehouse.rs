//! Warehouse: floor, back wall, a row of shelves and one robot.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::errors::Result;
use crate::models::Dimensions;
use crate::models::panel::Panel;
use crate::models::part::ModelNode;
use crate::models::robot::{RobotParams, build_robot};
use crate::models::shelf::build_shelf;

pub const SHELF_COUNT: usize = 3;

/// Back wall height as a multiple of the declared height.
pub const WALL_HEIGHT_FACTOR: f32 = 10.0;

/// Shelves are a tenth of the warehouse footprint.
pub const SHELF_SCALE: f32 = 0.1;

/// Gap between neighbouring shelves as a fraction of the warehouse width.
pub const SHELF_GAP_RATIO: f32 = 0.05;

/// Robot footprint as a fraction of the warehouse footprint.
pub const ROBOT_SCALE: f32 = 0.05;

/// Child order: floor, wall, shelves, robot.
pub const FLOOR_INDEX: usize = 0;
pub const WALL_INDEX: usize = 1;
pub const FIRST_SHELF_INDEX: usize = 2;
pub const ROBOT_INDEX: usize = FIRST_SHELF_INDEX + SHELF_COUNT;

/// Dimensions of each shelf in the row.
#[must_use]
pub fn shelf_dimensions(dims: Dimensions) -> Dimensions {
    Dimensions::new(
        dims.width * SHELF_SCALE,
        dims.height,
        dims.depth * SHELF_SCALE,
        dims.thickness,
    )
}

/// Distance between neighbouring shelf centres: shelf width plus a fixed gap.
#[must_use]
pub fn shelf_spacing(dims: Dimensions) -> f32 {
    shelf_dimensions(dims).width + SHELF_GAP_RATIO * dims.width
}

/// Robot sizing derived from the warehouse.
#[must_use]
pub fn robot_params(dims: Dimensions) -> RobotParams {
    RobotParams::new(dims.width * ROBOT_SCALE, dims.height * 0.5, dims.depth * ROBOT_SCALE)
}

/// Z coordinate of the shelf row.
#[must_use]
pub fn shelf_row_z(dims: Dimensions) -> f32 {
    -dims.depth / 4.0
}

pub fn build_warehouse(dims: Dimensions) -> Result<ModelNode> {
    dims.validate("warehouse")?;
    let Dimensions {
        width: w,
        height: h,
        depth: d,
        thickness: t,
    } = dims;

    let floor_top = t / 2.0;
    let wall_height = WALL_HEIGHT_FACTOR * h;

    let floor = Panel::new(2.0 * w, t, d, Vec3::ZERO)?;
    let wall = Panel::new(
        2.0 * w,
        wall_height,
        t,
        Vec3::new(0.0, floor_top + wall_height / 2.0, -d / 2.0 + t / 2.0),
    )?;

    let mut root = ModelNode::group("Warehouse");
    root.add(floor.into_node("Floor"));
    root.add(wall.into_node("BackWall"));

    let shelf_dims = shelf_dimensions(dims);
    let spacing = shelf_spacing(dims);
    let row_z = shelf_row_z(dims);
    for i in 0..SHELF_COUNT {
        let x = (i as f32 - (SHELF_COUNT as f32 - 1.0) / 2.0) * spacing;
        let shelf = build_shelf(shelf_dims)?
            .at(Vec3::new(x, floor_top + shelf_dims.height / 2.0, row_z))
            .rotated(Vec3::new(0.0, FRAC_PI_2, 0.0));
        root.add(shelf);
    }

    let robot = robot_params(dims);
    let robot_z = row_z + shelf_dims.depth * 2.0 + robot.depth;
    root.add(build_robot(robot)?.at(Vec3::new(0.0, floor_top + robot.ground_clearance(), robot_z)));

    log::debug!("Composed warehouse {w}x{h}x{d} (t = {t}) with {SHELF_COUNT} shelves");
    Ok(root)
}
