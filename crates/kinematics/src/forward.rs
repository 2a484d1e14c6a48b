//! The forward kinematics for the robot.
//!
//! Every joint chain starts in the robot frame and is described by a list of [`ChainLink`]s.
//! The pose of a link is the pose of its parent, translated by the offset of the link and then
//! rotated around the axis of the joint that moves it.

use std::f64::consts::FRAC_1_SQRT_2;

use nalgebra::{Isometry3, Point3, Translation3, Vector3, vector};
use nidhogg::{JointArray, JointId};

use crate::{
    dimensions,
    masses::{self, TOTAL_MASS},
    support::SupportFoot,
};

/// A single revolute joint in a kinematic chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChainLink {
    pub joint: JointId,
    /// Translation from the parent link to the joint, in the frame of the parent link.
    pub offset: Vector3<f64>,
    /// Unit rotation axis of the joint, in the frame of the parent link.
    pub axis: Vector3<f64>,
}

impl ChainLink {
    const fn new(joint: JointId, offset: Vector3<f64>, axis: Vector3<f64>) -> Self {
        Self {
            joint,
            offset,
            axis,
        }
    }

    /// Transform from the parent link to the link moved by this joint.
    #[must_use]
    pub fn transform(&self, angle: f64) -> Isometry3<f64> {
        Translation3::from(self.offset) * Isometry3::rotation(self.axis * angle)
    }
}

const NONE: Vector3<f64> = vector![0.0, 0.0, 0.0];
const ROLL: Vector3<f64> = vector![1.0, 0.0, 0.0];
const PITCH: Vector3<f64> = vector![0.0, 1.0, 0.0];
const YAW: Vector3<f64> = vector![0.0, 0.0, 1.0];

// The hip yaw pitch joints are tilted by 45 degrees, they yaw and pitch the pelvis at once.
const LEFT_HIP_YAW_PITCH: Vector3<f64> = vector![0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2];
const RIGHT_HIP_YAW_PITCH: Vector3<f64> = vector![0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2];

pub const LEFT_LEG: [ChainLink; 6] = [
    ChainLink::new(
        JointId::LeftHipYawPitch,
        dimensions::ROBOT_TO_LEFT_PELVIS,
        LEFT_HIP_YAW_PITCH,
    ),
    ChainLink::new(JointId::LeftHipRoll, NONE, ROLL),
    ChainLink::new(JointId::LeftHipPitch, NONE, PITCH),
    ChainLink::new(JointId::LeftKneePitch, dimensions::HIP_TO_KNEE, PITCH),
    ChainLink::new(JointId::LeftAnklePitch, dimensions::KNEE_TO_ANKLE, PITCH),
    ChainLink::new(JointId::LeftAnkleRoll, NONE, ROLL),
];

pub const RIGHT_LEG: [ChainLink; 6] = [
    ChainLink::new(
        JointId::RightHipYawPitch,
        dimensions::ROBOT_TO_RIGHT_PELVIS,
        RIGHT_HIP_YAW_PITCH,
    ),
    ChainLink::new(JointId::RightHipRoll, NONE, ROLL),
    ChainLink::new(JointId::RightHipPitch, NONE, PITCH),
    ChainLink::new(JointId::RightKneePitch, dimensions::HIP_TO_KNEE, PITCH),
    ChainLink::new(JointId::RightAnklePitch, dimensions::KNEE_TO_ANKLE, PITCH),
    ChainLink::new(JointId::RightAnkleRoll, NONE, ROLL),
];

pub const LEFT_ARM: [ChainLink; 5] = [
    ChainLink::new(
        JointId::LeftShoulderPitch,
        dimensions::ROBOT_TO_LEFT_SHOULDER,
        PITCH,
    ),
    ChainLink::new(JointId::LeftShoulderRoll, NONE, YAW),
    ChainLink::new(
        JointId::LeftElbowYaw,
        dimensions::LEFT_SHOULDER_TO_LEFT_ELBOW,
        ROLL,
    ),
    ChainLink::new(JointId::LeftElbowRoll, NONE, YAW),
    ChainLink::new(JointId::LeftWristYaw, dimensions::ELBOW_TO_WRIST, ROLL),
];

pub const RIGHT_ARM: [ChainLink; 5] = [
    ChainLink::new(
        JointId::RightShoulderPitch,
        dimensions::ROBOT_TO_RIGHT_SHOULDER,
        PITCH,
    ),
    ChainLink::new(JointId::RightShoulderRoll, NONE, YAW),
    ChainLink::new(
        JointId::RightElbowYaw,
        dimensions::RIGHT_SHOULDER_TO_RIGHT_ELBOW,
        ROLL,
    ),
    ChainLink::new(JointId::RightElbowRoll, NONE, YAW),
    ChainLink::new(JointId::RightWristYaw, dimensions::ELBOW_TO_WRIST, ROLL),
];

pub const HEAD: [ChainLink; 2] = [
    ChainLink::new(JointId::HeadYaw, dimensions::ROBOT_TO_NECK, YAW),
    ChainLink::new(JointId::HeadPitch, NONE, PITCH),
];

/// Every chain of the robot, each ordered from the robot frame outwards.
pub const CHAINS: [&[ChainLink]; 5] = [&LEFT_LEG, &RIGHT_LEG, &LEFT_ARM, &RIGHT_ARM, &HEAD];

/// Position and rotation axis of a joint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointFrame {
    pub position: Point3<f64>,
    /// Unit rotation axis, a positive angle rotates the distal links counter-clockwise around it.
    pub axis: Vector3<f64>,
}

impl JointFrame {
    /// Express this frame in another coordinate system.
    #[must_use]
    pub fn transformed(&self, isometry: &Isometry3<f64>) -> Self {
        Self {
            position: isometry * self.position,
            axis: isometry * self.axis,
        }
    }
}

/// Pose of every link of the robot, relative to the robot frame.
#[derive(Clone, Debug)]
pub struct RobotKinematics {
    links: JointArray<Isometry3<f64>>,
    frames: JointArray<JointFrame>,
    left_sole: Isometry3<f64>,
    right_sole: Isometry3<f64>,
}

impl From<&JointArray<f64>> for RobotKinematics {
    fn from(joints: &JointArray<f64>) -> Self {
        let mut links = JointArray::fill(Isometry3::identity());
        let mut frames = JointArray::fill(JointFrame {
            position: Point3::origin(),
            axis: Vector3::zeros(),
        });

        for chain in CHAINS {
            let mut parent = Isometry3::identity();
            for link in chain {
                frames[link.joint] = JointFrame {
                    position: parent * Point3::from(link.offset),
                    axis: parent * link.axis,
                };
                parent *= link.transform(joints[link.joint]);
                links[link.joint] = parent;
            }
        }

        let left_sole =
            links[JointId::LeftAnkleRoll] * Translation3::from(dimensions::ANKLE_TO_SOLE);
        let right_sole =
            links[JointId::RightAnkleRoll] * Translation3::from(dimensions::ANKLE_TO_SOLE);

        RobotKinematics {
            links,
            frames,
            left_sole,
            right_sole,
        }
    }
}

impl RobotKinematics {
    #[must_use]
    pub fn joint_frame(&self, joint: JointId) -> &JointFrame {
        &self.frames[joint]
    }

    /// Pose of the sole of a foot, this is the point on the ground right below the ankle.
    #[must_use]
    pub fn sole(&self, side: SupportFoot) -> &Isometry3<f64> {
        match side {
            SupportFoot::Left => &self.left_sole,
            SupportFoot::Right => &self.right_sole,
        }
    }

    /// Center of mass of the link moved by `joint`.
    #[must_use]
    pub fn link_center_of_mass(&self, joint: JointId) -> Point3<f64> {
        self.links[joint] * Point3::from(masses::link_mass(joint).center)
    }

    /// Center of mass of the whole robot.
    #[must_use]
    pub fn center_of_mass(&self) -> Point3<f64> {
        let moment = JointId::ALL
            .into_iter()
            .fold(masses::TORSO.mass * masses::TORSO.center, |moment, joint| {
                moment + masses::link_mass(joint).mass * self.link_center_of_mass(joint).coords
            });

        Point3::from(moment / TOTAL_MASS)
    }
}
