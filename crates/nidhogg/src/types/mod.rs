use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter};

/// Number of joints in the model.
pub const JOINT_COUNT: usize = JointId::COUNT;

/// Number of joints in the lower body, these always occupy the first indices.
pub const LOWER_BODY_JOINT_COUNT: usize = 12;

/// Identifier of a single joint of the robot.
///
/// The discriminant of each variant is the index of that joint in a [`JointArray`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(usize)]
pub enum JointId {
    // left leg
    LeftHipYawPitch = 0,
    LeftHipRoll = 1,
    LeftHipPitch = 2,
    LeftKneePitch = 3,
    LeftAnklePitch = 4,
    LeftAnkleRoll = 5,

    // right leg
    RightHipYawPitch = 6,
    RightHipRoll = 7,
    RightHipPitch = 8,
    RightKneePitch = 9,
    RightAnklePitch = 10,
    RightAnkleRoll = 11,

    // left arm
    LeftShoulderPitch = 12,
    LeftShoulderRoll = 13,
    LeftElbowYaw = 14,
    LeftElbowRoll = 15,
    LeftWristYaw = 16,

    // right arm
    RightShoulderPitch = 17,
    RightShoulderRoll = 18,
    RightElbowYaw = 19,
    RightElbowRoll = 20,
    RightWristYaw = 21,

    // head
    HeadPitch = 22,
    HeadYaw = 23,
}

impl JointId {
    /// The joints of the left leg, ordered from the hip to the foot.
    pub const LEFT_LEG: [JointId; 6] = [
        JointId::LeftHipYawPitch,
        JointId::LeftHipRoll,
        JointId::LeftHipPitch,
        JointId::LeftKneePitch,
        JointId::LeftAnklePitch,
        JointId::LeftAnkleRoll,
    ];

    /// The joints of the right leg, ordered from the hip to the foot.
    pub const RIGHT_LEG: [JointId; 6] = [
        JointId::RightHipYawPitch,
        JointId::RightHipRoll,
        JointId::RightHipPitch,
        JointId::RightKneePitch,
        JointId::RightAnklePitch,
        JointId::RightAnkleRoll,
    ];

    /// The joints of the left arm, ordered from the shoulder to the hand.
    pub const LEFT_ARM: [JointId; 5] = [
        JointId::LeftShoulderPitch,
        JointId::LeftShoulderRoll,
        JointId::LeftElbowYaw,
        JointId::LeftElbowRoll,
        JointId::LeftWristYaw,
    ];

    /// The joints of the right arm, ordered from the shoulder to the hand.
    pub const RIGHT_ARM: [JointId; 5] = [
        JointId::RightShoulderPitch,
        JointId::RightShoulderRoll,
        JointId::RightElbowYaw,
        JointId::RightElbowRoll,
        JointId::RightWristYaw,
    ];

    /// The joints of the head, ordered from the neck to the head.
    ///
    /// Note that this is *not* index order, the yaw joint comes first in the kinematic chain.
    pub const HEAD: [JointId; 2] = [JointId::HeadYaw, JointId::HeadPitch];

    /// Every joint, in index order.
    pub const ALL: [JointId; JOINT_COUNT] = [
        JointId::LeftHipYawPitch,
        JointId::LeftHipRoll,
        JointId::LeftHipPitch,
        JointId::LeftKneePitch,
        JointId::LeftAnklePitch,
        JointId::LeftAnkleRoll,
        JointId::RightHipYawPitch,
        JointId::RightHipRoll,
        JointId::RightHipPitch,
        JointId::RightKneePitch,
        JointId::RightAnklePitch,
        JointId::RightAnkleRoll,
        JointId::LeftShoulderPitch,
        JointId::LeftShoulderRoll,
        JointId::LeftElbowYaw,
        JointId::LeftElbowRoll,
        JointId::LeftWristYaw,
        JointId::RightShoulderPitch,
        JointId::RightShoulderRoll,
        JointId::RightElbowYaw,
        JointId::RightElbowRoll,
        JointId::RightWristYaw,
        JointId::HeadPitch,
        JointId::HeadYaw,
    ];

    /// Index of this joint in a [`JointArray`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this joint belongs to one of the legs.
    #[must_use]
    pub const fn is_lower_body(self) -> bool {
        self.index() < LOWER_BODY_JOINT_COUNT
    }
}

/// A value for every joint of the robot, indexed by [`JointId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointArray<T>([T; JOINT_COUNT]);

impl<T> JointArray<T> {
    #[must_use]
    pub const fn new(values: [T; JOINT_COUNT]) -> Self {
        Self(values)
    }

    /// Iterate over the joints and their values, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (JointId, &T)> {
        JointId::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Clone> JointArray<T> {
    /// Creates a [`JointArray`] with every joint set to `value`.
    pub fn fill(value: T) -> Self {
        Self(std::array::from_fn(|_| value.clone()))
    }
}

impl JointArray<f64> {
    /// The standard initial configuration of the robot.
    ///
    /// Slightly bent knees, arms resting next to the body and the head looking straight ahead.
    #[must_use]
    pub const fn standard_stance() -> Self {
        Self([
            // left leg
            0.0, 0.0, -0.436332, 0.698132, -0.349066, 0.0, //
            // right leg
            0.0, 0.0, -0.436332, 0.698132, -0.349066, 0.0, //
            // left arm
            1.396263, 0.349066, -1.396263, -1.047198, 0.0, //
            // right arm
            1.396263, -0.349066, 1.396263, 1.047198, 0.0, //
            // head
            0.0, 0.0,
        ])
    }

    /// Whether every value is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|value| value.is_finite())
    }
}

impl<T> Index<JointId> for JointArray<T> {
    type Output = T;

    fn index(&self, joint: JointId) -> &Self::Output {
        &self.0[joint.index()]
    }
}

impl<T> IndexMut<JointId> for JointArray<T> {
    fn index_mut(&mut self, joint: JointId) -> &mut Self::Output {
        &mut self.0[joint.index()]
    }
}
