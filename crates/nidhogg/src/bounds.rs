//! Calibrated joint angle limits.
//!
//! The bounds are plain data: a [`JointBounds`] is constructed once (usually [`JointBounds::NAO`],
//! optionally with per-robot overrides from a configuration file) and then shared read-only.

use serde::{Deserialize, Serialize};

use crate::types::{JointArray, JointId};

/// Lower and upper limit of a single joint, in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointLimit {
    pub lower: f64,
    pub upper: f64,
}

impl JointLimit {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Whether `angle` lies within the limit.
    ///
    /// `NaN` never lies within a limit.
    #[must_use]
    pub fn contains(&self, angle: f64) -> bool {
        self.lower <= angle && angle <= self.upper
    }
}

/// Per-joint `[lower, upper]` angle limits of the robot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointBounds {
    lower: JointArray<f64>,
    upper: JointArray<f64>,
}

impl JointBounds {
    /// Calibrated bounds of the NAO.
    pub const NAO: JointBounds = JointBounds {
        lower: JointArray::new([
            // left leg
            -1.145303, -0.379472, -1.773912, -0.092346, -1.189516, -0.769001, //
            // right leg
            -1.145303, -0.738321, -1.772308, -0.103083, -1.186448, -0.388676, //
            // left arm
            -2.085600, 0.008700, -2.085600, -1.562100, -1.823800, //
            // right arm
            -2.085600, -1.649400, -2.085600, 0.008700, -1.823800, //
            // head
            -2.085700, -0.672000,
        ]),
        upper: JointArray::new([
            // left leg
            0.740810, 0.790477, 0.484090, 2.112528, 0.922747, 0.397880, //
            // right leg
            0.740810, 0.414754, 0.485624, 2.120198, 0.932056, 0.785875, //
            // left arm
            2.085600, 1.649400, 2.085600, -0.008700, 1.823800, //
            // right arm
            2.085600, -0.008700, 2.085600, 1.562100, 1.823800, //
            // head
            2.085700, 0.514900,
        ]),
    };

    /// Creates a bounds table from explicit lower and upper limits.
    #[must_use]
    pub const fn new(lower: JointArray<f64>, upper: JointArray<f64>) -> Self {
        Self { lower, upper }
    }

    /// The calibrated bounds of the NAO.
    #[must_use]
    pub fn nao() -> Self {
        Self::NAO
    }

    /// Replace the limits of the provided joints.
    #[must_use]
    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (JointId, JointLimit)>,
    {
        for (joint, limit) in overrides {
            self.lower[joint] = limit.lower;
            self.upper[joint] = limit.upper;
        }
        self
    }

    /// The limit of a single joint.
    #[must_use]
    pub fn limit(&self, joint: JointId) -> JointLimit {
        JointLimit::new(self.lower[joint], self.upper[joint])
    }

    /// Check that all joint angles lie within bounds.
    ///
    /// Returns the first joint (in index order) that violates its limit, or `None` if all values
    /// are within bounds. Only the angle range is checked, there are no collision checks.
    #[must_use]
    pub fn check(&self, joints: &JointArray<f64>) -> Option<JointId> {
        joints
            .iter()
            .find(|(joint, angle)| !self.limit(*joint).contains(**angle))
            .map(|(joint, _)| joint)
    }
}

impl Default for JointBounds {
    fn default() -> Self {
        Self::NAO
    }
}
