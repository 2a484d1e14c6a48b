//! Joint types and per-robot calibration tables of the NAO robot.
//!
//! Joints are addressed by [`JointId`](types::JointId), whose discriminants are the stable indices
//! used by every joint vector in the workspace: the twelve lower-body joints come first, followed
//! by the arms and the head.

pub mod bounds;
pub mod types;

pub use bounds::{JointBounds, JointLimit};
pub use types::{JOINT_COUNT, JointArray, JointId, LOWER_BODY_JOINT_COUNT};
