//! Rigid 3D transformations built from direction vectors and Euler angles.

use crate::scalar::Real;
use crate::types::{Mat3, Vec3};
use std::ops::Mul;

/// Euler angles in the extrinsic XYZ convention, in radians.
///
/// The rotation they describe is `Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles<T> {
    /// Rotation about the x axis.
    pub roll: T,
    /// Rotation about the y axis.
    pub pitch: T,
    /// Rotation about the z axis.
    pub yaw: T,
}

impl<T: Real> EulerAngles<T> {
    /// Create a new set of angles.
    #[inline]
    pub fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// Affine transformation `p -> linear * p + translation`.
///
/// Transforms produced by the builders in this module are rigid: `linear` is a
/// rotation matrix. [`crate::umeyama::Similarity::to_affine`] may also store a
/// uniform scale in `linear`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine3<T> {
    /// The linear part, a rotation for rigid transforms.
    pub linear: Mat3<T>,
    /// The translation part.
    pub translation: Vec3<T>,
}

impl<T: Real> Default for Affine3<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Affine3<T> {
    /// Create a transform from its linear and translation parts.
    #[inline]
    pub fn new(linear: Mat3<T>, translation: Vec3<T>) -> Self {
        Self {
            linear,
            translation,
        }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(Mat3::identity(), Vec3::zeros())
    }

    /// Rotation that maps `z_axis` onto `(0, 0, 1)` and `y_direction` into the
    /// `x = 0` half-plane, onto `(0, 1, 0)` if it is orthogonal to `z_axis`.
    ///
    /// The rows of the rotation are the new axes expressed in the old frame.
    ///
    /// Example:
    ///
    /// ```
    /// use kornia_eigen::transform::Affine3;
    /// use kornia_eigen::types::Vec3;
    ///
    /// let t: Affine3<f64> = Affine3::from_unit_vectors_zy(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    /// let z = t.transform_vector(Vec3::new(1.0, 0.0, 0.0));
    /// assert!((z.z - 1.0).abs() < 1e-12);
    /// ```
    pub fn from_unit_vectors_zy(z_axis: Vec3<T>, y_direction: Vec3<T>) -> Self {
        let x = y_direction.cross(z_axis).normalize();
        let y = z_axis.cross(x).normalize();
        let z = z_axis.normalize();
        Self::new(Mat3::from_row_vectors(x, y, z), Vec3::zeros())
    }

    /// Rotation that maps `x_axis` onto `(1, 0, 0)` and `y_direction` into the
    /// `z = 0` half-plane, onto `(0, 1, 0)` if it is orthogonal to `x_axis`.
    pub fn from_unit_vectors_xy(x_axis: Vec3<T>, y_direction: Vec3<T>) -> Self {
        let z = x_axis.cross(y_direction).normalize();
        let y = z.cross(x_axis).normalize();
        let x = x_axis.normalize();
        Self::new(Mat3::from_row_vectors(x, y, z), Vec3::zeros())
    }

    /// Same as [`Affine3::from_unit_vectors_zy`] with the arguments swapped.
    #[inline]
    pub fn from_two_unit_vectors(y_direction: Vec3<T>, z_axis: Vec3<T>) -> Self {
        Self::from_unit_vectors_zy(z_axis, y_direction)
    }

    /// Rigid transform that moves `origin` to `(0, 0, 0)`, then rotates as
    /// [`Affine3::from_two_unit_vectors`].
    pub fn from_two_unit_vectors_and_origin(
        y_direction: Vec3<T>,
        z_axis: Vec3<T>,
        origin: Vec3<T>,
    ) -> Self {
        let mut t = Self::from_two_unit_vectors(y_direction, z_axis);
        t.translation = -(t.linear * origin);
        t
    }

    /// Rigid transform from a translation and XYZ Euler angles.
    pub fn from_translation_euler(x: T, y: T, z: T, roll: T, pitch: T, yaw: T) -> Self {
        let (b, a) = yaw.sin_cos();
        let (d, c) = pitch.sin_cos();
        let (f, e) = roll.sin_cos();
        let (de, df) = (d * e, d * f);

        let linear = Mat3::from_rows([
            [a * c, a * df - b * e, b * f + a * de],
            [b * c, a * e + b * df, b * de - a * f],
            [-d, c * f, c * e],
        ]);
        Self::new(linear, Vec3::new(x, y, z))
    }

    /// Rigid transform from a translation vector and Euler angles.
    #[inline]
    pub fn from_parts(translation: Vec3<T>, angles: EulerAngles<T>) -> Self {
        Self::from_translation_euler(
            translation.x,
            translation.y,
            translation.z,
            angles.roll,
            angles.pitch,
            angles.yaw,
        )
    }

    /// Extract the XYZ Euler angles of the rotation part.
    ///
    /// At gimbal lock (`pitch = ±pi/2`) roll and yaw are not unique; the values
    /// returned are whatever `atan2` yields on the degenerate entries.
    pub fn to_euler_xyz(&self) -> EulerAngles<T> {
        let r = &self.linear;
        EulerAngles {
            roll: r[(2, 1)].atan2(r[(2, 2)]),
            pitch: (-r[(2, 0)]).asin(),
            yaw: r[(1, 0)].atan2(r[(0, 0)]),
        }
    }

    /// Extract the translation and the XYZ Euler angles.
    #[inline]
    pub fn to_translation_and_euler(&self) -> (Vec3<T>, EulerAngles<T>) {
        (self.translation, self.to_euler_xyz())
    }

    /// Apply the transform to a point.
    #[inline]
    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        self.linear * p + self.translation
    }

    /// Apply the linear part only, e.g. to a direction.
    #[inline]
    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        self.linear * v
    }

    /// Inverse of a rigid transform, using the transpose of the rotation.
    ///
    /// PRECONDITION: `linear` is a rotation matrix.
    #[inline]
    pub fn inverse_rigid(&self) -> Self {
        let rt = self.linear.transpose();
        Self::new(rt, -(rt * self.translation))
    }

    /// Homogeneous 4x4 matrix, row-major.
    pub fn to_matrix4(&self) -> [[T; 4]; 4] {
        let (z, o) = (T::zero(), T::one());
        let r = &self.linear.0;
        let t = self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t.x],
            [r[1][0], r[1][1], r[1][2], t.y],
            [r[2][0], r[2][1], r[2][2], t.z],
            [z, z, z, o],
        ]
    }

    /// Build from the top 3x4 block of a homogeneous matrix.
    pub fn from_matrix4(m: &[[T; 4]; 4]) -> Self {
        let linear = Mat3::from_rows([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ]);
        Self::new(linear, Vec3::new(m[0][3], m[1][3], m[2][3]))
    }

    /// Whether the linear part is orthonormal with determinant +1, within `tol`.
    pub fn rotation_is_orthonormal(&self, tol: T) -> bool {
        let rtr = self.linear.transpose() * self.linear;
        let identity = Mat3::<T>::identity();
        let orthonormal =
            (0..3).all(|i| (0..3).all(|j| (rtr[(i, j)] - identity[(i, j)]).abs() <= tol));
        orthonormal && (self.linear.determinant() - T::one()).abs() <= tol
    }
}

impl<T: Real> Mul for Affine3<T> {
    type Output = Self;

    /// Composition: `(a * b).transform_point(p) == a.transform_point(b.transform_point(p))`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.linear * rhs.linear,
            self.linear * rhs.translation + self.translation,
        )
    }
}
