//! Solver settings and joint bound calibration, loaded from `igm.toml`.

use std::{collections::BTreeMap, path::Path};

use nidhogg::{JointArray, JointBounds, JointId, JointLimit};
use odal::{Config, ConfigKind, ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    error::ConfigError,
    solver::{IgmSolver, SolverSettings},
    target::Penalty,
};

/// Configuration of the inverse geometric model.
///
/// ```toml
/// [solver]
/// tolerance = 0.0005
/// max_iterations = 20
/// penalty_max_iterations = 100
/// norm = "euclidean"
/// mu = 0.1
///
/// [joint_bounds.left_hip_roll]
/// lower = -0.379472
/// upper = 0.790477
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgmConfig {
    #[serde(default)]
    pub solver: SolverSettings,
    /// Robot specific bounds that replace the calibrated defaults.
    #[serde(default)]
    pub joint_bounds: BTreeMap<JointId, JointLimit>,
}

impl Config for IgmConfig {
    const PATH: &'static str = "igm.toml";
}

impl IgmConfig {
    /// Load and validate the configuration, the overlay is optional.
    pub fn load_validated(main_dir: &Path, overlay_dir: &Path) -> Result<Self, ConfigError> {
        let config = match Self::load_with_overlay(main_dir, overlay_dir) {
            Ok(config) => config,
            Err(odal::Error {
                name,
                kind:
                    ErrorKind::Load {
                        path,
                        config_kind: ConfigKind::Overlay,
                        ..
                    },
            }) => {
                debug!("`{name}`: no overlay at `{}`", path.display());
                Self::load(main_dir)?
            }
            Err(error) => return Err(error.into()),
        };

        config.validate()?;
        info!(
            overrides = config.joint_bounds.len(),
            tolerance = config.solver.tolerance,
            "loaded igm config"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let solver = &self.solver;
        if !(solver.tolerance.is_finite() && solver.tolerance > 0.0) {
            return Err(ConfigError::Tolerance(solver.tolerance));
        }
        if solver.max_iterations == 0 {
            return Err(ConfigError::IterationCap("max_iterations"));
        }
        if solver.penalty_max_iterations == 0 {
            return Err(ConfigError::IterationCap("penalty_max_iterations"));
        }
        if !(solver.mu.is_finite() && solver.mu > 0.0) {
            return Err(ConfigError::PenaltyWeight(solver.mu));
        }

        for (joint, limit) in &self.joint_bounds {
            if limit.lower.is_nan() || limit.upper.is_nan() || limit.lower > limit.upper {
                return Err(ConfigError::Bounds {
                    joint: *joint,
                    lower: limit.lower,
                    upper: limit.upper,
                });
            }
        }

        Ok(())
    }

    /// The calibrated bounds with the overrides of this configuration applied.
    #[must_use]
    pub fn bounds(&self) -> JointBounds {
        JointBounds::nao().with_overrides(self.joint_bounds.iter().map(|(j, l)| (*j, *l)))
    }

    #[must_use]
    pub fn solver(&self) -> IgmSolver {
        IgmSolver::new(self.solver.clone())
    }

    /// A penalty towards `reference` with the configured weight.
    #[must_use]
    pub fn penalty(&self, reference: JointArray<f64>) -> Penalty {
        Penalty::new(reference, self.solver.mu)
    }
}
