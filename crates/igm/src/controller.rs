//! Solving one walking step after the other.

use kinematics::SupportFoot;
use nalgebra::Vector3;
use nidhogg::JointArray;
use tracing::{debug, warn};

use crate::{
    error::SolveError,
    provider::{KinematicsProvider, NaoKinematics},
    solver::IgmSolver,
    state::ModelState,
    target::Targets,
};

/// Information for the gait controller once a step has finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepFeedback {
    /// Expected minus measured landing position of the former swing foot, z is always zero.
    pub landing_error: Vector3<f64>,
    /// The foot the robot stands on now.
    pub support: SupportFoot,
}

/// Owns the model state and keeps the last solution that was accepted.
///
/// A failed solve is rolled back, the joint angles of the state are always either the measured
/// angles of the last support switch or the result of a converged solve.
#[derive(Debug)]
pub struct SupportFootController<P = NaoKinematics> {
    state: ModelState,
    committed: JointArray<f64>,
    solver: IgmSolver,
    provider: P,
    targets: Targets,
}

impl<P: KinematicsProvider> SupportFootController<P> {
    pub fn new(state: ModelState, solver: IgmSolver, provider: P) -> Self {
        let committed = *state.joints();
        let targets = Targets::from_state(&state);

        Self {
            state,
            committed,
            solver,
            provider,
            targets,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ModelState {
        &self.state
    }

    #[must_use]
    pub fn solver(&self) -> &IgmSolver {
        &self.solver
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The targets of the last accepted solve.
    #[must_use]
    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Solve for `targets`, starting from the last accepted joint angles.
    ///
    /// On success the solution is accepted, on failure the state is restored.
    pub fn solve_step(&mut self, targets: &Targets) -> Result<usize, SolveError> {
        match self.solver.solve(&mut self.state, targets, &self.provider) {
            Ok(iterations) => {
                self.committed = *self.state.joints();
                self.targets = targets.clone();

                if let Some(joint) = self.state.check_joint_bounds() {
                    warn!(%joint, angle = self.state.joints()[joint], "joint out of bounds");
                }

                Ok(iterations)
            }
            Err(error) => {
                self.state.set_joints(&self.committed, &self.provider);
                Err(error)
            }
        }
    }

    /// Finish the current step, the swing foot has landed and becomes the support foot.
    pub fn finish_step(&mut self, measured: &JointArray<f64>) -> StepFeedback {
        let landing_error = self.state.switch_support_foot(measured, &self.provider);
        self.committed = *measured;
        self.targets = Targets::from_state(&self.state);

        debug!(support = %self.state.support(), "finished step");

        StepFeedback {
            landing_error,
            support: self.state.support(),
        }
    }
}
