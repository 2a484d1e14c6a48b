//! Result and Error types for the crate.
use miette::Diagnostic;
use nidhogg::JointId;
use thiserror::Error;

/// Reasons for the solver to stop without a solution.
///
/// Steps that were applied before the failure stay in the model state.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    #[error("solver did not converge within {iterations} iterations")]
    #[diagnostic(
        code(igm::did_not_converge),
        help("the targets may be out of reach of the current configuration")
    )]
    DidNotConverge { iterations: usize },

    #[error("constraint system is not positive definite in iteration {iteration}")]
    #[diagnostic(
        code(igm::ill_conditioned),
        help("the constraints are linearly dependent, check the constraint set and joint selection")
    )]
    IllConditioned { iteration: usize },

    #[error("constraint system or step contains non-finite values in iteration {iteration}")]
    #[diagnostic(code(igm::non_finite))]
    NonFinite { iteration: usize },
}

impl SolveError {
    /// The iteration in which the solver stopped.
    #[must_use]
    pub fn iteration(&self) -> usize {
        match self {
            SolveError::DidNotConverge { iterations } => *iterations,
            SolveError::IllConditioned { iteration } | SolveError::NonFinite { iteration } => {
                *iteration
            }
        }
    }
}

/// Invalid or unreadable solver configuration.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] odal::Error),

    #[error("solver tolerance must be positive and finite, got {0}")]
    Tolerance(f64),

    #[error("`{0}` must be at least 1")]
    IterationCap(&'static str),

    #[error("penalty weight must be positive and finite, got {0}")]
    PenaltyWeight(f64),

    #[error("bounds of {joint} are invalid: [{lower}, {upper}]")]
    #[diagnostic(help("the lower limit must not exceed the upper limit"))]
    Bounds {
        joint: JointId,
        lower: f64,
        upper: f64,
    },
}
