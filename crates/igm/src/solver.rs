//! Newton solver for the inverse geometric model.
//!
//! Every iteration linearizes the constraints around the current joint angles and takes the
//! step `dq` that satisfies them to first order. Among all such steps the solver picks the one
//! closest to the penalty direction, which is found by solving the KKT system
//!
//! ```text
//! (A A^T + D) lambda = r + A z
//!             dq     = -z + A^T lambda
//! ```
//!
//! with `z = mu (q - q0)` the gradient of the penalty (zero without a penalty), and `D` the
//! identity on the rows of inactive constraints. Without a penalty this is the minimum norm step.

use nalgebra::{SMatrix, SVector};
use nidhogg::{JOINT_COUNT, JointId};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    constraints::{CONSTRAINT_ROWS, ConstraintSet, ConstraintSystem, JointSelection},
    error::SolveError,
    provider::KinematicsProvider,
    state::ModelState,
    target::Targets,
};

type JointVector = SVector<f64, JOINT_COUNT>;
type KktMatrix = SMatrix<f64, CONSTRAINT_ROWS, CONSTRAINT_ROWS>;

/// Norm of a step that is compared against the tolerance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepNorm {
    /// Euclidean norm over the independent selected joints.
    ///
    /// While the hip coupling is enforced, the right hip yaw pitch only mirrors the left one and
    /// is left out.
    #[default]
    Euclidean,
    /// Largest change of any selected joint.
    Infinity,
}

impl StepNorm {
    fn evaluate(self, step: &JointVector, selection: JointSelection, coupled: bool) -> f64 {
        let joints = selection
            .joints()
            .filter(|joint| !(coupled && *joint == JointId::RightHipYawPitch));

        match self {
            StepNorm::Euclidean => joints
                .map(|joint| step[joint.index()].powi(2))
                .sum::<f64>()
                .sqrt(),
            StepNorm::Infinity => selection
                .joints()
                .map(|joint| step[joint.index()].abs())
                .fold(0.0, f64::max),
        }
    }
}

/// Tuning of the solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    /// The solver converged once the step norm is at most this value, in radians.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Iteration cap while a penalty is active, the penalty converges linearly.
    pub penalty_max_iterations: usize,
    pub norm: StepNorm,
    /// Default weight of the penalty on the distance to the reference configuration.
    pub mu: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 5e-4,
            max_iterations: 20,
            penalty_max_iterations: 100,
            norm: StepNorm::Euclidean,
            mu: 0.1,
        }
    }
}

/// The state of the solver after the last call to [`IgmSolver::solve`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolverStatus {
    #[default]
    NotStarted,
    Iterating {
        iteration: usize,
    },
    Converged {
        iterations: usize,
    },
    Failed(SolveError),
}

/// Iterative solver for the joint angles that realize a set of [`Targets`].
#[derive(Clone, Debug)]
pub struct IgmSolver {
    settings: SolverSettings,
    constraints: ConstraintSet,
    selection: JointSelection,
    status: SolverStatus,
    system: ConstraintSystem,
}

impl Default for IgmSolver {
    fn default() -> Self {
        Self::new(SolverSettings::default())
    }
}

impl IgmSolver {
    #[must_use]
    pub fn new(settings: SolverSettings) -> Self {
        Self {
            settings,
            constraints: ConstraintSet::FULL,
            selection: JointSelection::LowerBody,
            status: SolverStatus::NotStarted,
            system: ConstraintSystem::zeros(),
        }
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_selection(mut self, selection: JointSelection) -> Self {
        self.selection = selection;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    #[must_use]
    pub fn constraints(&self) -> ConstraintSet {
        self.constraints
    }

    #[must_use]
    pub fn selection(&self) -> JointSelection {
        self.selection
    }

    #[must_use]
    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// The constraint system of the last iteration.
    #[must_use]
    pub fn system(&self) -> &ConstraintSystem {
        &self.system
    }

    /// Move the selected joints of `state` until the targets are met.
    ///
    /// The joint angles in `state` are the initial guess. Returns the number of iterations
    /// until convergence, at least one. On failure the steps taken so far remain applied, the
    /// derived quantities of `state` are refreshed in both cases.
    pub fn solve<P: KinematicsProvider + ?Sized>(
        &mut self,
        state: &mut ModelState,
        targets: &Targets,
        provider: &P,
    ) -> Result<usize, SolveError> {
        let result = self.iterate(state, targets, provider);
        state.refresh(provider);

        match result {
            Ok(iterations) => {
                debug!(iterations, "solver converged");
                self.status = SolverStatus::Converged { iterations };
            }
            Err(error) => {
                warn!(%error, "solver failed");
                self.status = SolverStatus::Failed(error);
            }
        }

        result
    }

    fn iterate<P: KinematicsProvider + ?Sized>(
        &mut self,
        state: &mut ModelState,
        targets: &Targets,
        provider: &P,
    ) -> Result<usize, SolveError> {
        let max_iterations = if targets.penalty.is_some() {
            self.settings.penalty_max_iterations
        } else {
            self.settings.max_iterations
        };

        for iteration in 1..=max_iterations {
            self.status = SolverStatus::Iterating { iteration };

            provider.constraint_system(
                state.joints(),
                state.support(),
                state.anchor(),
                targets,
                self.constraints,
                self.selection,
                &mut self.system,
            );
            if !self.system.is_finite() {
                return Err(SolveError::NonFinite { iteration });
            }

            let gradient = self.penalty_gradient(state, targets);
            let step = self
                .step(&gradient)
                .ok_or(SolveError::IllConditioned { iteration })?;
            if !step.iter().all(|value| value.is_finite()) {
                return Err(SolveError::NonFinite { iteration });
            }

            let joints = state.joints_mut();
            for joint in self.selection.joints() {
                joints[joint] += step[joint.index()];
            }

            let norm =
                self.settings
                    .norm
                    .evaluate(&step, self.selection, self.constraints.hip_coupling);
            trace!(
                iteration,
                norm,
                residual = self.system.residual.norm(),
                "solver step"
            );

            if norm <= self.settings.tolerance {
                return Ok(iteration);
            }
        }

        Err(SolveError::DidNotConverge {
            iterations: max_iterations,
        })
    }

    /// Gradient of the penalty on the selected joints.
    fn penalty_gradient(&self, state: &ModelState, targets: &Targets) -> JointVector {
        let mut gradient = JointVector::zeros();

        if let Some(penalty) = &targets.penalty {
            let joints = state.joints();
            for joint in self.selection.joints() {
                gradient[joint.index()] = penalty.mu * (joints[joint] - penalty.reference[joint]);
            }
        }

        gradient
    }

    /// Solve the KKT system, returns `None` if it is not positive definite.
    fn step(&self, gradient: &JointVector) -> Option<JointVector> {
        let matrix = &self.system.matrix;

        let mut kkt: KktMatrix = matrix * matrix.transpose();
        for row in 0..CONSTRAINT_ROWS {
            if !self.constraints.is_active(row) {
                kkt[(row, row)] += 1.0;
            }
        }

        let rhs = self.system.residual + matrix * gradient;
        let lambda = kkt.cholesky()?.solve(&rhs);

        Some(matrix.transpose() * lambda - gradient)
    }
}
