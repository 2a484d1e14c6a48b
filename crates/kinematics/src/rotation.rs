//! Conversions between roll-pitch-yaw angles and rotations.
//!
//! A rotation defined using roll, pitch and yaw angles is formed by first rotating around the x
//! axis (roll), then around the *new* y axis (pitch), and finally around the *new* z axis (yaw).
//! In other words `R = Rx(roll) * Ry(pitch) * Rz(yaw)`.
//!
//! Note that this differs from [`Rotation3::from_euler_angles`], which rotates around the fixed
//! axes.

use nalgebra::{Rotation3, UnitQuaternion, Vector3};

/// Rotation matrix corresponding to a set of roll-pitch-yaw angles, in radians.
#[must_use]
pub fn rpy_to_rotation(roll: f64, pitch: f64, yaw: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), roll)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), pitch)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), yaw)
}

/// Quaternion corresponding to a set of roll-pitch-yaw angles, in radians.
#[must_use]
pub fn rpy_to_quaternion(roll: f64, pitch: f64, yaw: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), roll)
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pitch)
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw)
}

/// Extract the roll-pitch-yaw angles of a rotation.
///
/// The pitch is always in `[-pi/2, pi/2]`.
#[must_use]
pub fn rotation_to_rpy(rotation: &Rotation3<f64>) -> (f64, f64, f64) {
    let m = rotation.matrix();

    let pitch = m[(0, 2)].clamp(-1.0, 1.0).asin();
    let roll = (-m[(1, 2)]).atan2(m[(2, 2)]);
    let yaw = (-m[(0, 1)]).atan2(m[(0, 0)]);

    (roll, pitch, yaw)
}

/// Applies a roll-pitch-yaw offset, expressed in the frame of `base`.
#[must_use]
pub fn rotation_offset(base: &Rotation3<f64>, roll: f64, pitch: f64, yaw: f64) -> Rotation3<f64> {
    base * rpy_to_rotation(roll, pitch, yaw)
}
