//! The [`Posture`] of a frame: its position and orientation.

use std::ops::Mul;

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion, Vector3};

use crate::rotation::rpy_to_quaternion;

/// Position and orientation of a frame, as a rigid transform.
///
/// Composition is right-multiplication: `a * b` expresses `b` in the frame of `a`, it is not
/// commutative. The orientation is stored as a unit quaternion, so it stays orthonormal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Posture(Isometry3<f64>);

impl Posture {
    /// The posture at the origin, without rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self(Isometry3::identity())
    }

    /// Build a posture from a position and a roll-pitch-yaw orientation.
    ///
    /// See [`crate::rotation`] for the angle convention.
    #[must_use]
    pub fn from_euler(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self(Isometry3::from_parts(
            Translation3::new(x, y, z),
            rpy_to_quaternion(roll, pitch, yaw),
        ))
    }

    /// Build a posture from a position vector and a roll-pitch-yaw orientation.
    #[must_use]
    pub fn from_position_euler(position: Vector3<f64>, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self::from_euler(position.x, position.y, position.z, roll, pitch, yaw)
    }

    /// Build a posture that is only rotated around the z axis.
    ///
    /// This is the reduced form of a foot target, where the roll and pitch are zero.
    #[must_use]
    pub fn from_position_yaw(position: Vector3<f64>, yaw: f64) -> Self {
        Self::from_euler(position.x, position.y, position.z, 0.0, 0.0, yaw)
    }

    #[must_use]
    pub fn from_parts(position: Vector3<f64>, orientation: Rotation3<f64>) -> Self {
        Self(Isometry3::from_parts(
            Translation3::from(position),
            UnitQuaternion::from_rotation_matrix(&orientation),
        ))
    }

    /// Convert a homogeneous 4x4 matrix into a posture.
    ///
    /// Returns `None` if the rotation block is not orthonormal within `tolerance`, or if the
    /// matrix is not a rigid transform.
    #[must_use]
    pub fn from_homogeneous(matrix: &Matrix4<f64>, tolerance: f64) -> Option<Self> {
        let rotation: Matrix3<f64> = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let orthonormal = (rotation * rotation.transpose() - Matrix3::identity()).amax() <= tolerance
            && (rotation.determinant() - 1.0).abs() <= tolerance;
        let last_row = matrix.fixed_view::<1, 4>(3, 0);
        let rigid = last_row[(0, 0)].abs() <= tolerance
            && last_row[(0, 1)].abs() <= tolerance
            && last_row[(0, 2)].abs() <= tolerance
            && (last_row[(0, 3)] - 1.0).abs() <= tolerance;

        if !orthonormal || !rigid {
            return None;
        }

        let position = matrix.fixed_view::<3, 1>(0, 3).into_owned();
        Some(Self::from_parts(
            position,
            Rotation3::from_matrix_unchecked(rotation),
        ))
    }

    /// The homogeneous 4x4 matrix of this posture.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4<f64> {
        self.0.to_homogeneous()
    }

    /// Returns `self * offset`, where the offset is given as a translation and a roll-pitch-yaw
    /// rotation, both expressed in the frame of `self`.
    #[must_use]
    pub fn offset(&self, dx: f64, dy: f64, dz: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        *self * Self::from_euler(dx, dy, dz, roll, pitch, yaw)
    }

    #[must_use]
    pub fn position(&self) -> Vector3<f64> {
        self.0.translation.vector
    }

    #[must_use]
    pub fn orientation(&self) -> Rotation3<f64> {
        self.0.rotation.to_rotation_matrix()
    }

    #[must_use]
    pub fn quaternion(&self) -> &UnitQuaternion<f64> {
        &self.0.rotation
    }

    #[must_use]
    pub fn isometry(&self) -> &Isometry3<f64> {
        &self.0
    }

    /// The same orientation, at a different position.
    #[must_use]
    pub fn with_position(&self, position: Vector3<f64>) -> Self {
        Self(Isometry3::from_parts(Translation3::from(position), self.0.rotation))
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.inverse())
    }

    /// Whether all components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.translation.vector.iter().all(|value| value.is_finite())
            && self.0.rotation.coords.iter().all(|value| value.is_finite())
    }
}

/// Difference between the positions of two postures, `a - b`.
///
/// The orientations are ignored.
#[must_use]
pub fn position_difference(a: &Posture, b: &Posture) -> Vector3<f64> {
    a.position() - b.position()
}

impl Default for Posture {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Isometry3<f64>> for Posture {
    fn from(isometry: Isometry3<f64>) -> Self {
        Self(isometry)
    }
}

impl From<Posture> for Isometry3<f64> {
    fn from(posture: Posture) -> Self {
        posture.0
    }
}

impl Mul for Posture {
    type Output = Posture;

    fn mul(self, rhs: Posture) -> Self::Output {
        Posture(self.0 * rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::rpy_to_rotation;
    use approx::assert_relative_eq;

    #[test]
    fn zero_offset_of_identity_is_identity() {
        let posture = Posture::identity().offset(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(
            posture.to_homogeneous(),
            Matrix4::identity(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn translation_offset_is_rotated_by_base() {
        let base = Posture::from_euler(0.1, -0.2, 0.3, 0.2, -0.1, 0.9);
        let moved = base.offset(0.02, 0.01, -0.03, 0.0, 0.0, 0.0);

        let expected = base.position() + base.orientation() * Vector3::new(0.02, 0.01, -0.03);
        assert_relative_eq!(moved.position(), expected, epsilon = 1e-12);
        assert_relative_eq!(
            moved.orientation().into_inner(),
            base.orientation().into_inner(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn composition_is_not_commutative() {
        let a = Posture::from_euler(0.1, 0.0, 0.0, 0.0, 0.0, 0.5);
        let b = Posture::from_euler(0.0, 0.1, 0.0, 0.3, 0.0, 0.0);
        assert!(((a * b).to_homogeneous() - (b * a).to_homogeneous()).norm() > 1e-3);
    }

    #[test]
    fn rotation_offset_is_intrinsic() {
        let base = Posture::from_euler(0.0, 0.0, 0.0, 0.0, 0.0, 0.4);
        let turned = base.offset(0.0, 0.0, 0.0, 0.1, 0.1, 0.1);
        assert_relative_eq!(
            turned.orientation().into_inner(),
            (rpy_to_rotation(0.0, 0.0, 0.4) * rpy_to_rotation(0.1, 0.1, 0.1)).into_inner(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn position_difference_ignores_orientation() {
        let a = Posture::from_euler(0.3, 0.2, 0.1, 0.5, 0.0, 0.0);
        let b = Posture::from_euler(0.1, 0.2, 0.4, 0.0, 0.0, 1.0);
        assert_relative_eq!(
            position_difference(&a, &b),
            Vector3::new(0.2, 0.0, -0.3),
            epsilon = 1e-12
        );
    }

    #[test]
    fn reduced_target_has_no_roll_or_pitch() {
        let posture = Posture::from_position_yaw(Vector3::new(0.0, 0.1, 0.0), 0.3);
        let up = posture.orientation() * Vector3::z();
        assert_relative_eq!(up, Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn homogeneous_roundtrip() {
        let posture = Posture::from_euler(0.05, -0.1, 0.2, 0.1, 0.2, -0.3);
        let restored = Posture::from_homogeneous(&posture.to_homogeneous(), 1e-9).unwrap();
        assert_relative_eq!(
            restored.to_homogeneous(),
            posture.to_homogeneous(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn non_orthonormal_matrix_is_rejected() {
        let mut matrix = Matrix4::identity();
        matrix[(0, 0)] = 1.1;
        assert!(Posture::from_homogeneous(&matrix, 1e-6).is_none());

        let mut projective = Matrix4::identity();
        projective[(3, 0)] = 0.5;
        assert!(Posture::from_homogeneous(&projective, 1e-6).is_none());
    }
}
