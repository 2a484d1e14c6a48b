//! The state of the kinematic model between solves.

use std::sync::Arc;

use kinematics::{Posture, SupportFoot};
use nalgebra::{Point3, Rotation3, Vector3};
use nidhogg::{JointArray, JointBounds, JointId};
use tracing::debug;

use crate::provider::KinematicsProvider;

/// Expected and measured positions of both feet.
///
/// The expected positions follow from the model state, the measured positions from the joint
/// angles reported by the sensors. The support foot is assumed to be where the model expects it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeetPositions {
    pub left_expected: Vector3<f64>,
    pub right_expected: Vector3<f64>,
    pub left_measured: Vector3<f64>,
    pub right_measured: Vector3<f64>,
}

/// Joint angles of the robot, together with the foot it stands on.
///
/// The swing foot posture, center of mass and torso orientation are derived from the joint
/// angles and kept up to date by [`ModelState::refresh`].
#[derive(Clone, Debug)]
pub struct ModelState {
    joints: JointArray<f64>,
    support: SupportFoot,
    anchor: Posture,
    bounds: Arc<JointBounds>,
    swing_foot: Posture,
    center_of_mass: Point3<f64>,
    torso_orientation: Rotation3<f64>,
}

impl ModelState {
    /// Create the model state of a robot standing on `support` with its sole at `anchor`.
    pub fn init<P: KinematicsProvider + ?Sized>(
        support: SupportFoot,
        anchor: Posture,
        measured: &JointArray<f64>,
        bounds: Arc<JointBounds>,
        provider: &P,
    ) -> Self {
        let mut state = Self {
            joints: *measured,
            support,
            anchor,
            bounds,
            swing_foot: Posture::identity(),
            center_of_mass: Point3::origin(),
            torso_orientation: Rotation3::identity(),
        };
        state.refresh(provider);
        state
    }

    #[must_use]
    pub fn joints(&self) -> &JointArray<f64> {
        &self.joints
    }

    #[must_use]
    pub fn support(&self) -> SupportFoot {
        self.support
    }

    /// Posture of the support sole in the world frame.
    #[must_use]
    pub fn anchor(&self) -> &Posture {
        &self.anchor
    }

    #[must_use]
    pub fn bounds(&self) -> &Arc<JointBounds> {
        &self.bounds
    }

    #[must_use]
    pub fn swing_foot(&self) -> &Posture {
        &self.swing_foot
    }

    #[must_use]
    pub fn center_of_mass(&self) -> &Point3<f64> {
        &self.center_of_mass
    }

    #[must_use]
    pub fn torso_orientation(&self) -> &Rotation3<f64> {
        &self.torso_orientation
    }

    /// Mutable access to the joint angles.
    ///
    /// The derived quantities are stale until the next [`ModelState::refresh`].
    pub(crate) fn joints_mut(&mut self) -> &mut JointArray<f64> {
        &mut self.joints
    }

    /// Replace the joint angles, and refresh the derived quantities.
    pub fn set_joints<P: KinematicsProvider + ?Sized>(
        &mut self,
        joints: &JointArray<f64>,
        provider: &P,
    ) {
        self.joints = *joints;
        self.refresh(provider);
    }

    /// Recompute the swing foot posture, center of mass and torso orientation.
    pub fn refresh<P: KinematicsProvider + ?Sized>(&mut self, provider: &P) {
        self.swing_foot = provider.swing_foot_posture(&self.joints, self.support, &self.anchor);
        self.center_of_mass = provider.center_of_mass(&self.joints, self.support, &self.anchor);
        self.torso_orientation =
            provider.torso_orientation(&self.joints, self.support, &self.anchor);
    }

    /// The first joint, in index order, whose angle is outside of its bounds.
    #[must_use]
    pub fn check_joint_bounds(&self) -> Option<JointId> {
        self.bounds.check(&self.joints)
    }

    /// Make the swing foot the new support foot.
    ///
    /// The new anchor is the posture of the swing foot according to the `measured` joint angles,
    /// placed on the ground. Returns the difference between the expected and the measured
    /// landing position, with a zero z component.
    pub fn switch_support_foot<P: KinematicsProvider + ?Sized>(
        &mut self,
        measured: &JointArray<f64>,
        provider: &P,
    ) -> Vector3<f64> {
        let landed = provider.swing_foot_posture(measured, self.support, &self.anchor);

        let mut landing_error = self.swing_foot.position() - landed.position();
        landing_error.z = 0.0;

        let mut position = landed.position();
        position.z = 0.0;

        self.support = self.support.opposite();
        self.anchor = landed.with_position(position);
        self.joints = *measured;
        self.refresh(provider);

        debug!(
            support = %self.support,
            error_x = landing_error.x,
            error_y = landing_error.y,
            "switched support foot"
        );

        landing_error
    }

    /// Positions of both feet, as expected by the model and as measured.
    pub fn feet_positions<P: KinematicsProvider + ?Sized>(
        &self,
        measured: &JointArray<f64>,
        provider: &P,
    ) -> FeetPositions {
        let support = self.anchor.position();
        let swing_expected = self.swing_foot.position();
        let swing_measured = provider
            .swing_foot_posture(measured, self.support, &self.anchor)
            .position();

        match self.support {
            SupportFoot::Left => FeetPositions {
                left_expected: support,
                right_expected: swing_expected,
                left_measured: support,
                right_measured: swing_measured,
            },
            SupportFoot::Right => FeetPositions {
                left_expected: swing_expected,
                right_expected: support,
                left_measured: swing_measured,
                right_measured: support,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::provider::NaoKinematics;

    fn state(support: SupportFoot) -> ModelState {
        ModelState::init(
            support,
            Posture::identity(),
            &JointArray::standard_stance(),
            Arc::new(JointBounds::nao()),
            &NaoKinematics,
        )
    }

    #[test]
    fn init_derives_quantities() {
        let state = state(SupportFoot::Right);

        assert_relative_eq!(
            state.swing_foot().position(),
            Vector3::new(0.0, 0.1, 0.0),
            epsilon = 1e-9
        );
        assert!(state.center_of_mass().z > 0.2);
        assert_relative_eq!(state.center_of_mass().y, 0.05, epsilon = 1e-3);
        assert_eq!(state.check_joint_bounds(), None);
    }

    #[test]
    fn bounds_are_shared() {
        let bounds = Arc::new(JointBounds::nao());
        let left = ModelState::init(
            SupportFoot::Left,
            Posture::identity(),
            &JointArray::standard_stance(),
            Arc::clone(&bounds),
            &NaoKinematics,
        );
        let right = ModelState::init(
            SupportFoot::Right,
            Posture::identity(),
            &JointArray::standard_stance(),
            Arc::clone(&bounds),
            &NaoKinematics,
        );

        assert!(Arc::ptr_eq(left.bounds(), right.bounds()));
        assert_eq!(Arc::strong_count(&bounds), 3);
    }

    #[test]
    fn bound_violations_are_reported() {
        let mut state = state(SupportFoot::Left);
        let mut joints = *state.joints();
        joints[JointId::LeftKneePitch] = -1.0;
        joints[JointId::RightHipRoll] = 1.0;
        state.set_joints(&joints, &NaoKinematics);

        assert_eq!(state.check_joint_bounds(), Some(JointId::LeftKneePitch));
    }

    #[test]
    fn switching_twice_returns_to_the_same_foot() {
        let mut state = state(SupportFoot::Left);
        let measured = JointArray::standard_stance();

        let error = state.switch_support_foot(&measured, &NaoKinematics);
        assert_eq!(state.support(), SupportFoot::Right);
        assert_relative_eq!(error, Vector3::zeros(), epsilon = 1e-12);
        assert_relative_eq!(
            state.anchor().position(),
            Vector3::new(0.0, -0.1, 0.0),
            epsilon = 1e-9
        );

        state.switch_support_foot(&measured, &NaoKinematics);
        assert_eq!(state.support(), SupportFoot::Left);
        assert_relative_eq!(state.anchor().position(), Vector3::zeros(), epsilon = 1e-9);
    }

    #[test]
    fn landing_error_is_horizontal() {
        let mut state = state(SupportFoot::Right);
        let mut measured = JointArray::standard_stance();
        measured[JointId::LeftHipPitch] -= 0.05;

        let error = state.switch_support_foot(&measured, &NaoKinematics);
        assert_eq!(error.z, 0.0);
        assert!(error.x.abs() > 1e-3);
        assert_eq!(state.anchor().position().z, 0.0);
        assert_eq!(state.joints(), &measured);
    }

    #[test]
    fn feet_positions() {
        let state = state(SupportFoot::Left);
        let mut measured = *state.joints();
        measured[JointId::RightKneePitch] += 0.1;

        let feet = state.feet_positions(&measured, &NaoKinematics);
        assert_eq!(feet.left_expected, feet.left_measured);
        assert_eq!(feet.left_expected, Vector3::zeros());
        assert_relative_eq!(
            feet.right_expected,
            Vector3::new(0.0, -0.1, 0.0),
            epsilon = 1e-9
        );
        assert!((feet.right_measured - feet.right_expected).norm() > 1e-3);
    }
}
