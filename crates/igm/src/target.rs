//! Desired postures for the solver.

use kinematics::{Posture, rotation};
use nalgebra::{Point3, Rotation3, Vector3};
use nidhogg::JointArray;

use crate::state::ModelState;

/// Penalty on the distance to a reference configuration.
///
/// The penalty resolves the redundancy of the whole body, the solver minimizes
/// `mu / 2 * |q - reference|^2` among all configurations that satisfy the constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct Penalty {
    pub reference: JointArray<f64>,
    pub mu: f64,
}

impl Penalty {
    #[must_use]
    pub fn new(reference: JointArray<f64>, mu: f64) -> Self {
        Self { reference, mu }
    }
}

/// Targets of a single solve, all expressed in the world frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Targets {
    pub swing_foot: Posture,
    pub center_of_mass: Point3<f64>,
    /// Desired torso orientation, only its roll and pitch are constrained.
    pub torso: Rotation3<f64>,
    pub penalty: Option<Penalty>,
}

impl Targets {
    #[must_use]
    pub fn new(swing_foot: Posture, center_of_mass: Point3<f64>, torso: Rotation3<f64>) -> Self {
        Self {
            swing_foot,
            center_of_mass,
            torso,
            penalty: None,
        }
    }

    /// Targets that are already satisfied by `state`.
    #[must_use]
    pub fn from_state(state: &ModelState) -> Self {
        Self::new(
            *state.swing_foot(),
            *state.center_of_mass(),
            *state.torso_orientation(),
        )
    }

    /// Replace the swing foot target by a position and yaw, with zero roll and pitch.
    #[must_use]
    pub fn with_swing_foot_yaw(mut self, position: Vector3<f64>, yaw: f64) -> Self {
        self.swing_foot = Posture::from_position_yaw(position, yaw);
        self
    }

    /// Offset the swing foot target, in the frame of the swing foot.
    #[must_use]
    pub fn with_swing_offset(
        mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        droll: f64,
        dpitch: f64,
        dyaw: f64,
    ) -> Self {
        self.swing_foot = self.swing_foot.offset(dx, dy, dz, droll, dpitch, dyaw);
        self
    }

    #[must_use]
    pub fn with_com(mut self, x: f64, y: f64, z: f64) -> Self {
        self.center_of_mass = Point3::new(x, y, z);
        self
    }

    /// Offset the center of mass target, in the world frame.
    #[must_use]
    pub fn with_com_offset(mut self, dx: f64, dy: f64, dz: f64) -> Self {
        self.center_of_mass += Vector3::new(dx, dy, dz);
        self
    }

    /// Rotate the torso target, in the frame of the torso.
    #[must_use]
    pub fn with_torso_offset(mut self, droll: f64, dpitch: f64, dyaw: f64) -> Self {
        self.torso = rotation::rotation_offset(&self.torso, droll, dpitch, dyaw);
        self
    }

    #[must_use]
    pub fn with_penalty(mut self, penalty: Penalty) -> Self {
        self.penalty = Some(penalty);
        self
    }
}
