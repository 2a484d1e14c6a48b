//! Kinematics of the NAO robot.
//!
//! This crate contains the rigid body model of the robot: link dimensions and masses, the forward
//! kinematics of every joint chain, and the [`SupportKinematics`] which express the whole robot in
//! a world frame anchored at the foot that is currently bearing weight.
//!
//! All frames follow the same convention, the x-axis points forward, the y-axis points left, and
//! the z-axis points up.

pub mod dimensions;
pub mod forward;
pub mod masses;
pub mod posture;
pub mod rotation;
pub mod support;

pub mod prelude {
    pub use super::forward::RobotKinematics;
    pub use super::posture::{Posture, position_difference};
    pub use super::support::{SupportFoot, SupportKinematics};
}

pub use forward::RobotKinematics;
pub use posture::{Posture, position_difference};
pub use support::{SupportFoot, SupportKinematics};
