//! Forward kinematics and Jacobians used by the solver.

use kinematics::{
    Posture, SupportFoot, SupportKinematics,
    support::Jacobian,
};
use nalgebra::{Point3, Rotation3, Vector3};
use nidhogg::{JointArray, JointId};

use crate::{
    constraints::{
        CENTER_OF_MASS, ConstraintSet, ConstraintSystem, HIP_COUPLING, JointSelection,
        SWING_ORIENTATION, SWING_POSITION, TORSO,
    },
    target::Targets,
};

/// Kinematic model of the robot, standing on `support` with its sole at `anchor`.
///
/// Implementations must be deterministic: the same inputs yield the same outputs.
pub trait KinematicsProvider: Send + Sync {
    fn swing_foot_posture(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
    ) -> Posture;

    fn center_of_mass(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
    ) -> Point3<f64>;

    fn torso_orientation(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
    ) -> Rotation3<f64>;

    /// Fill `system` with the linearized constraints at `joints`.
    ///
    /// Rows of inactive constraints and columns of unselected joints must be zero.
    #[allow(clippy::too_many_arguments)]
    fn constraint_system(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
        targets: &Targets,
        constraints: ConstraintSet,
        selection: JointSelection,
        system: &mut ConstraintSystem,
    );
}

/// Rigid body model of the NAO, with analytic Jacobians.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaoKinematics;

impl KinematicsProvider for NaoKinematics {
    fn swing_foot_posture(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
    ) -> Posture {
        SupportKinematics::new(joints, support, anchor).swing_foot()
    }

    fn center_of_mass(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
    ) -> Point3<f64> {
        SupportKinematics::new(joints, support, anchor).center_of_mass()
    }

    fn torso_orientation(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
    ) -> Rotation3<f64> {
        SupportKinematics::new(joints, support, anchor).torso_orientation()
    }

    fn constraint_system(
        &self,
        joints: &JointArray<f64>,
        support: SupportFoot,
        anchor: &Posture,
        targets: &Targets,
        constraints: ConstraintSet,
        selection: JointSelection,
        system: &mut ConstraintSystem,
    ) {
        let kinematics = SupportKinematics::new(joints, support, anchor);
        let swing = kinematics.swing_foot();

        // swing foot
        let position_error = targets.swing_foot.position() - swing.position();
        let orientation_error =
            (targets.swing_foot.quaternion() * swing.quaternion().inverse()).scaled_axis();
        let swing_jacobian = kinematics.swing_foot_jacobian();

        system
            .residual
            .fixed_rows_mut::<3>(SWING_POSITION)
            .copy_from(&position_error);
        system
            .residual
            .fixed_rows_mut::<3>(SWING_ORIENTATION)
            .copy_from(&orientation_error);
        system
            .matrix
            .fixed_rows_mut::<6>(SWING_POSITION)
            .copy_from(&swing_jacobian);

        // center of mass
        system
            .residual
            .fixed_rows_mut::<3>(CENTER_OF_MASS)
            .copy_from(&(targets.center_of_mass - kinematics.center_of_mass()));
        system
            .matrix
            .fixed_rows_mut::<3>(CENTER_OF_MASS)
            .copy_from(&kinematics.center_of_mass_jacobian());

        // torso, the cross product of the up vectors is the rotation that levels them
        let up = kinematics.torso_orientation() * Vector3::z();
        let desired_up = targets.torso * Vector3::z();
        let tilt = up.cross(&desired_up);
        let torso_jacobian: Jacobian<3> = kinematics.torso_jacobian();

        system
            .residual
            .fixed_rows_mut::<2>(TORSO)
            .copy_from(&tilt.fixed_rows::<2>(0));
        system
            .matrix
            .fixed_rows_mut::<2>(TORSO)
            .copy_from(&torso_jacobian.fixed_rows::<2>(0));

        // hip yaw pitch coupling
        system.residual[HIP_COUPLING] =
            joints[JointId::RightHipYawPitch] - joints[JointId::LeftHipYawPitch];
        system.matrix.row_mut(HIP_COUPLING).fill(0.0);
        system.matrix[(HIP_COUPLING, JointId::LeftHipYawPitch.index())] = 1.0;
        system.matrix[(HIP_COUPLING, JointId::RightHipYawPitch.index())] = -1.0;

        system.mask(constraints, selection);
    }
}
