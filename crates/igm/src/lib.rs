//! Inverse geometric model of the legs of the NAO.
//!
//! Given a desired posture of the swing foot, a desired position of the center of mass and a
//! desired torso orientation, the [`IgmSolver`] computes the joint angles that realize them. The
//! [`SupportFootController`] tracks which foot bears the weight of the robot, and where it is.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use igm::prelude::*;
//! use kinematics::{Posture, SupportFoot};
//! use nidhogg::{JointArray, JointBounds};
//!
//! let provider = NaoKinematics;
//! let mut state = ModelState::init(
//!     SupportFoot::Right,
//!     Posture::identity(),
//!     &JointArray::standard_stance(),
//!     Arc::new(JointBounds::nao()),
//!     &provider,
//! );
//!
//! let targets = Targets::from_state(&state)
//!     .with_swing_offset(-0.02, 0.01, 0.02, 0.1, 0.1, 0.1)
//!     .with_com_offset(0.03, 0.02, -0.01);
//!
//! let iterations = IgmSolver::default().solve(&mut state, &targets, &provider)?;
//! # Ok::<(), igm::SolveError>(())
//! ```

pub mod config;
pub mod constraints;
pub mod controller;
pub mod error;
pub mod provider;
pub mod solver;
pub mod state;
pub mod target;

pub mod prelude {
    pub use crate::config::IgmConfig;
    pub use crate::constraints::{ConstraintSet, JointSelection};
    pub use crate::controller::{StepFeedback, SupportFootController};
    pub use crate::error::{ConfigError, SolveError};
    pub use crate::provider::{KinematicsProvider, NaoKinematics};
    pub use crate::solver::{IgmSolver, SolverSettings, SolverStatus, StepNorm};
    pub use crate::state::{FeetPositions, ModelState};
    pub use crate::target::{Penalty, Targets};
}

pub use config::IgmConfig;
pub use controller::{StepFeedback, SupportFootController};
pub use error::{ConfigError, SolveError};
pub use provider::{KinematicsProvider, NaoKinematics};
pub use solver::{IgmSolver, SolverSettings, SolverStatus, StepNorm};
pub use state::{FeetPositions, ModelState};
pub use target::{Penalty, Targets};
