//! Mobile robot: a body on four spherical wheels with a two-segment arm.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::panel::{Panel, ensure_positive};
use crate::models::part::{Anchor, ModelNode, Shape};

/// Wheel radius as a fraction of the smaller footprint side.
pub const WHEEL_RADIUS_RATIO: f32 = 0.3;

/// Arm segment cross-section as a fraction of the body width/depth.
pub const ARM_THICKNESS_RATIO: f32 = 0.1;

/// Arm segment length as a fraction of the body height.
pub const ARM_LENGTH_RATIO: f32 = 0.6;

/// Solid child of each arm pivot, extending up from the pivot.
pub const ARM_SEGMENT: &str = "Segment";

/// Child order of the robot root.
pub const ROBOT_PARTS: [&str; 6] = ["Body", "WheelFL", "WheelFR", "WheelBL", "WheelBR", "LowerArm"];

/// Robot construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Lower segment angle from vertical, about Z (radians).
    pub lower_arm_angle: f32,
    /// Upper segment angle relative to the lower segment, about Z (radians).
    pub upper_arm_angle: f32,
}

impl RobotParams {
    #[must_use]
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("robot", "width", self.width)?;
        ensure_positive("robot", "height", self.height)?;
        ensure_positive("robot", "depth", self.depth)?;
        Ok(())
    }

    #[must_use]
    pub fn wheel_radius(&self) -> f32 {
        WHEEL_RADIUS_RATIO * self.width.min(self.depth)
    }

    /// Distance from the robot origin down to the bottom of the wheels.
    #[must_use]
    pub fn ground_clearance(&self) -> f32 {
        self.height / 2.0 + 2.0 * self.wheel_radius()
    }

    /// Pivot of the lower arm segment in the robot frame (centre of the top face).
    #[must_use]
    pub fn lower_arm_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.height / 2.0, 0.0)
    }

    /// Pivot of the upper segment in the lower segment's frame (its tip).
    #[must_use]
    pub fn upper_arm_offset(&self) -> Vec3 {
        Vec3::new(0.0, self.arm_length(), 0.0)
    }

    #[must_use]
    pub fn arm_length(&self) -> f32 {
        ARM_LENGTH_RATIO * self.height
    }
}

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 75.0,
            depth: 100.0,
            lower_arm_angle: -PI / 6.0,
            upper_arm_angle: -PI / 4.0,
        }
    }
}

/// Builds a robot. The returned root carries [`Anchor::Robot`].
///
/// Wheels sit at the four body corners, one radius below the body.
/// The upper arm is a child of the lower arm, not of the body, so it follows
/// the lower arm's pose. Both arm nodes sit at their joint, with the solid
/// segment as their first child.
pub fn build_robot(params: RobotParams) -> Result<ModelNode> {
    params.validate()?;
    let RobotParams {
        width: w,
        height: h,
        depth: d,
        ..
    } = params;

    let r = params.wheel_radius();
    let body = Panel::new(w, h, d, Vec3::ZERO)?;

    let mut root = ModelNode::group("Robot").anchored(Anchor::Robot);
    root.add(body.into_node(ROBOT_PARTS[0]));

    let wheel_y = -h / 2.0 - r;
    let corners = [
        Vec3::new(-w / 2.0, wheel_y, -d / 2.0),
        Vec3::new(w / 2.0, wheel_y, -d / 2.0),
        Vec3::new(-w / 2.0, wheel_y, d / 2.0),
        Vec3::new(w / 2.0, wheel_y, d / 2.0),
    ];
    for (name, corner) in ROBOT_PARTS[1..5].iter().zip(corners) {
        root.add(ModelNode::solid(*name, Shape::Sphere { radius: r }).at(corner));
    }

    // each arm node is a pivot; its segment sits half a length above it so
    // the rotation swings the segment about its base
    let length = params.arm_length();
    let segment = || {
        ModelNode::solid(
            ARM_SEGMENT,
            Shape::Cuboid {
                width: ARM_THICKNESS_RATIO * w,
                height: length,
                depth: ARM_THICKNESS_RATIO * d,
            },
        )
        .at(Vec3::new(0.0, length / 2.0, 0.0))
    };
    let upper = ModelNode::group("UpperArm")
        .at(params.upper_arm_offset())
        .rotated(Vec3::new(0.0, 0.0, params.upper_arm_angle))
        .with_child(segment());
    let lower = ModelNode::group(ROBOT_PARTS[5])
        .at(params.lower_arm_offset())
        .rotated(Vec3::new(0.0, 0.0, params.lower_arm_angle))
        .with_child(segment())
        .with_child(upper);
    root.add(lower);

    log::debug!("Composed robot {w}x{h}x{d}, wheel radius {r}");
    Ok(root)
}
