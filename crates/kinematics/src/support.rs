//! Kinematics in the world frame anchored at the support foot.
//!
//! While a foot bears the weight of the robot it does not move, the rest of the robot moves
//! relative to it. The world frame is therefore defined by the posture of the support sole, and
//! moving a joint of the support leg rotates everything *but* the distal part of that leg.

use nalgebra::{Isometry3, Point3, Rotation3, SMatrix, Vector3};
use nidhogg::{JOINT_COUNT, JointArray, JointId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{
    forward::{self, JointFrame, RobotKinematics},
    masses::{self, TOTAL_MASS},
    posture::Posture,
};

/// A Jacobian with `R` rows, and one column per joint.
pub type Jacobian<const R: usize> = SMatrix<f64, R, JOINT_COUNT>;

/// The foot that is currently bearing the weight of the robot.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SupportFoot {
    #[default]
    Left,
    Right,
}

impl SupportFoot {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            SupportFoot::Left => SupportFoot::Right,
            SupportFoot::Right => SupportFoot::Left,
        }
    }

    /// The joints of this leg, ordered from the hip to the foot.
    #[must_use]
    pub const fn joints(self) -> [JointId; 6] {
        match self {
            SupportFoot::Left => JointId::LEFT_LEG,
            SupportFoot::Right => JointId::RIGHT_LEG,
        }
    }

    fn contains(self, joint: JointId) -> bool {
        self.joints().contains(&joint)
    }
}

/// Forward kinematics and Jacobians of the robot, standing on one foot.
///
/// All quantities are expressed in the world frame, in which the sole of the support foot is at
/// the anchor posture.
#[derive(Clone, Debug)]
pub struct SupportKinematics {
    support: SupportFoot,
    robot: RobotKinematics,
    robot_to_world: Isometry3<f64>,
}

impl SupportKinematics {
    #[must_use]
    pub fn new(joints: &JointArray<f64>, support: SupportFoot, anchor: &Posture) -> Self {
        let robot = RobotKinematics::from(joints);
        let robot_to_world = anchor.isometry() * robot.sole(support).inverse();

        Self {
            support,
            robot,
            robot_to_world,
        }
    }

    #[must_use]
    pub fn support(&self) -> SupportFoot {
        self.support
    }

    /// Pose of the robot frame in the world frame.
    #[must_use]
    pub fn robot_to_world(&self) -> &Isometry3<f64> {
        &self.robot_to_world
    }

    /// Posture of the sole of either foot.
    ///
    /// For the support foot this is the anchor, up to rounding.
    #[must_use]
    pub fn sole(&self, side: SupportFoot) -> Posture {
        Posture::from(self.robot_to_world * self.robot.sole(side))
    }

    #[must_use]
    pub fn swing_foot(&self) -> Posture {
        self.sole(self.support.opposite())
    }

    /// Orientation of the torso, which is the orientation of the robot frame.
    #[must_use]
    pub fn torso_orientation(&self) -> Rotation3<f64> {
        self.robot_to_world.rotation.to_rotation_matrix()
    }

    #[must_use]
    pub fn center_of_mass(&self) -> Point3<f64> {
        self.robot_to_world * self.robot.center_of_mass()
    }

    /// Position and axis of `joint`, and the direction in which it moves the robot.
    ///
    /// A joint of the support leg keeps its distal links fixed and rotates the rest of the robot,
    /// the opposite way.
    fn joint_frame(&self, joint: JointId) -> (JointFrame, f64) {
        let frame = self
            .robot
            .joint_frame(joint)
            .transformed(&self.robot_to_world);
        let sign = if self.support.contains(joint) {
            -1.0
        } else {
            1.0
        };

        (frame, sign)
    }

    /// Jacobian of the swing foot: linear velocity in the upper three rows, angular velocity in
    /// the lower three.
    ///
    /// Only the joints of the legs move the swing foot.
    #[must_use]
    pub fn swing_foot_jacobian(&self) -> Jacobian<6> {
        let mut jacobian = Jacobian::<6>::zeros();
        let swing = self.swing_foot().position();

        for joint in JointId::LEFT_LEG.into_iter().chain(JointId::RIGHT_LEG) {
            let (frame, sign) = self.joint_frame(joint);
            let linear = sign * frame.axis.cross(&(swing - frame.position.coords));
            let angular = sign * frame.axis;

            let mut column = jacobian.column_mut(joint.index());
            column.fixed_rows_mut::<3>(0).copy_from(&linear);
            column.fixed_rows_mut::<3>(3).copy_from(&angular);
        }

        jacobian
    }

    /// Angular Jacobian of the torso.
    ///
    /// Only the joints of the support leg rotate the torso.
    #[must_use]
    pub fn torso_jacobian(&self) -> Jacobian<3> {
        let mut jacobian = Jacobian::<3>::zeros();

        for joint in self.support.joints() {
            let (frame, sign) = self.joint_frame(joint);
            jacobian.set_column(joint.index(), &(sign * frame.axis));
        }

        jacobian
    }

    /// Jacobian of the center of mass of the whole robot.
    ///
    /// A joint moves the combined mass of its moving links, the column is the velocity of that
    /// partial center of mass weighted by its share of the total mass.
    #[must_use]
    pub fn center_of_mass_jacobian(&self) -> Jacobian<3> {
        let mut jacobian = Jacobian::<3>::zeros();

        let total_moment = JointId::ALL
            .into_iter()
            .fold(self.torso_moment(), |moment, joint| {
                moment + self.link_moment(joint)
            });

        for chain in forward::CHAINS {
            let mut distal_mass = 0.0;
            let mut distal_moment = Vector3::zeros();

            for link in chain.iter().rev() {
                distal_mass += masses::link_mass(link.joint).mass;
                distal_moment += self.link_moment(link.joint);

                let (frame, sign) = self.joint_frame(link.joint);
                let (mass, moment) = if self.support.contains(link.joint) {
                    (TOTAL_MASS - distal_mass, total_moment - distal_moment)
                } else {
                    (distal_mass, distal_moment)
                };

                let column =
                    sign * frame.axis.cross(&(moment - mass * frame.position.coords)) / TOTAL_MASS;
                jacobian.set_column(link.joint.index(), &column);
            }
        }

        jacobian
    }

    fn link_moment(&self, joint: JointId) -> Vector3<f64> {
        let center = self.robot_to_world * self.robot.link_center_of_mass(joint);
        masses::link_mass(joint).mass * center.coords
    }

    fn torso_moment(&self) -> Vector3<f64> {
        let center = self.robot_to_world * Point3::from(masses::TORSO.center);
        masses::TORSO.mass * center.coords
    }
}
