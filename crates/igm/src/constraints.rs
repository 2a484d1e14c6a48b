//! The linearized constraint system solved in every iteration.
//!
//! The system has a fixed layout of [`CONSTRAINT_ROWS`] rows, one column per joint:
//!
//! | rows    | constraint                                     |
//! |---------|------------------------------------------------|
//! | 0..3    | position of the swing foot                     |
//! | 3..6    | orientation of the swing foot                  |
//! | 6..9    | position of the center of mass                 |
//! | 9..11   | roll and pitch of the torso                    |
//! | 11      | both hip yaw pitch joints have the same angle  |
//!
//! Rows of inactive constraints and columns of joints that are not solved for are zero.

use nalgebra::{SMatrix, SVector};
use nidhogg::{JOINT_COUNT, JointId};
use serde::{Deserialize, Serialize};

/// Number of rows in a [`ConstraintSystem`].
pub const CONSTRAINT_ROWS: usize = 12;

pub const SWING_POSITION: usize = 0;
pub const SWING_ORIENTATION: usize = 3;
pub const CENTER_OF_MASS: usize = 6;
pub const TORSO: usize = 9;
pub const HIP_COUPLING: usize = 11;

pub type ConstraintMatrix = SMatrix<f64, CONSTRAINT_ROWS, JOINT_COUNT>;
pub type Residual = SVector<f64, CONSTRAINT_ROWS>;

/// The constraints that are imposed by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub swing_position: bool,
    pub swing_orientation: bool,
    pub center_of_mass: bool,
    /// Only roll and pitch of the torso are constrained, the yaw follows from the other rows.
    pub torso: bool,
    pub hip_coupling: bool,
}

impl ConstraintSet {
    /// Swing foot posture, center of mass, torso roll and pitch, and the hip coupling.
    pub const FULL: ConstraintSet = ConstraintSet {
        swing_position: true,
        swing_orientation: true,
        center_of_mass: true,
        torso: true,
        hip_coupling: true,
    };

    /// Swing foot posture, center of mass and the hip coupling, the torso is free.
    pub const FOOT_AND_COM: ConstraintSet = ConstraintSet {
        torso: false,
        ..ConstraintSet::FULL
    };

    /// Whether `row` of the constraint system belongs to an active constraint.
    #[must_use]
    pub fn is_active(&self, row: usize) -> bool {
        match row {
            0..3 => self.swing_position,
            3..6 => self.swing_orientation,
            6..9 => self.center_of_mass,
            9..11 => self.torso,
            11 => self.hip_coupling,
            _ => false,
        }
    }

    /// Number of active rows.
    #[must_use]
    pub fn active_rows(&self) -> usize {
        (0..CONSTRAINT_ROWS).filter(|row| self.is_active(*row)).count()
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::FULL
    }
}

/// The joints that the solver is allowed to move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointSelection {
    /// The twelve leg joints.
    #[default]
    LowerBody,
    /// Every joint, the arms and head are used to shift the center of mass.
    WholeBody,
}

impl JointSelection {
    #[must_use]
    pub fn contains(self, joint: JointId) -> bool {
        match self {
            JointSelection::LowerBody => joint.is_lower_body(),
            JointSelection::WholeBody => true,
        }
    }

    /// The selected joints, in index order.
    pub fn joints(self) -> impl Iterator<Item = JointId> {
        JointId::ALL
            .into_iter()
            .filter(move |joint| self.contains(*joint))
    }
}

/// Linearized constraints `matrix * dq = residual`.
///
/// The residual is `desired - current`, the matrix is the derivative of the current values with
/// respect to the joint angles.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstraintSystem {
    pub matrix: ConstraintMatrix,
    pub residual: Residual,
}

impl ConstraintSystem {
    #[must_use]
    pub fn zeros() -> Self {
        Self {
            matrix: ConstraintMatrix::zeros(),
            residual: Residual::zeros(),
        }
    }

    /// Zero the rows of inactive constraints and the columns of joints that are not selected.
    pub fn mask(&mut self, constraints: ConstraintSet, selection: JointSelection) {
        for row in 0..CONSTRAINT_ROWS {
            if !constraints.is_active(row) {
                self.matrix.row_mut(row).fill(0.0);
                self.residual[row] = 0.0;
            }
        }

        for joint in JointId::ALL {
            if !selection.contains(joint) {
                self.matrix.column_mut(joint.index()).fill(0.0);
            }
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().chain(self.residual.iter()).all(|value| value.is_finite())
    }
}

impl Default for ConstraintSystem {
    fn default() -> Self {
        Self::zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_counts() {
        assert_eq!(ConstraintSet::FULL.active_rows(), CONSTRAINT_ROWS);
        assert_eq!(ConstraintSet::FOOT_AND_COM.active_rows(), 10);
        assert!(!ConstraintSet::FOOT_AND_COM.is_active(TORSO));
        assert!(!ConstraintSet::FOOT_AND_COM.is_active(TORSO + 1));
        assert!(ConstraintSet::FOOT_AND_COM.is_active(HIP_COUPLING));
    }

    #[test]
    fn selection() {
        assert_eq!(JointSelection::LowerBody.joints().count(), 12);
        assert_eq!(JointSelection::WholeBody.joints().count(), JOINT_COUNT);
        assert!(!JointSelection::LowerBody.contains(JointId::LeftShoulderPitch));
        assert!(JointSelection::WholeBody.contains(JointId::HeadYaw));
    }

    #[test]
    fn mask_clears_inactive_rows_and_unselected_columns() {
        let mut system = ConstraintSystem {
            matrix: ConstraintMatrix::from_element(1.0),
            residual: Residual::from_element(1.0),
        };
        system.mask(ConstraintSet::FOOT_AND_COM, JointSelection::LowerBody);

        assert_eq!(system.residual[TORSO], 0.0);
        assert_eq!(system.residual[HIP_COUPLING], 1.0);
        assert_eq!(system.matrix.row(TORSO + 1).sum(), 0.0);
        assert_eq!(
            system.matrix.column(JointId::RightWristYaw.index()).sum(),
            0.0
        );
        assert_eq!(system.matrix[(0, JointId::LeftKneePitch.index())], 1.0);
    }

    #[test]
    fn non_finite_values_are_detected() {
        let mut system = ConstraintSystem::zeros();
        assert!(system.is_finite());

        system.matrix[(4, 7)] = f64::NAN;
        assert!(!system.is_finite());
    }
}
