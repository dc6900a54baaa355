//! Fixed-size vector and matrix value types.
//!
//! Matrices are stored row-major. All types are `Copy` and live on the stack.

use crate::scalar::{is_much_smaller_than, Real};
use approx::{AbsDiffEq, RelativeEq};
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// 2D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2<T> {
    /// The x component.
    pub x: T,
    /// The y component.
    pub y: T,
}

/// 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3<T> {
    /// The x component.
    pub x: T,
    /// The y component.
    pub y: T,
    /// The z component.
    pub z: T,
}

/// 2x2 matrix stored as rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat2<T>(pub [[T; 2]; 2]);

/// 3x3 matrix stored as rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3<T>(pub [[T; 3]; 3]);

impl<T: Real> Vec2<T> {
    /// Create a new vector from its components.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// The zero vector.
    #[inline]
    pub fn zeros() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Create a vector from an array.
    #[inline]
    pub fn from_array(arr: [T; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    /// Convert to array.
    #[inline]
    pub fn to_array(self) -> [T; 2] {
        [self.x, self.y]
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.x * rhs.x + self.y * rhs.y
    }

    /// Squared euclidean norm.
    #[inline]
    pub fn norm_squared(self) -> T {
        self.dot(self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(self) -> T {
        self.norm_squared().sqrt()
    }

    /// Unit vector in the same direction; returned unchanged when the norm is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let norm = self.norm();
        if norm > T::zero() {
            self / norm
        } else {
            self
        }
    }

    /// The vector rotated by +90 degrees.
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl<T: Real> Vec3<T> {
    /// Create a new vector from its components.
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[inline]
    pub fn zeros() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// The unit x axis.
    #[inline]
    pub fn unit_x() -> Self {
        Self::new(T::one(), T::zero(), T::zero())
    }

    /// The unit y axis.
    #[inline]
    pub fn unit_y() -> Self {
        Self::new(T::zero(), T::one(), T::zero())
    }

    /// The unit z axis.
    #[inline]
    pub fn unit_z() -> Self {
        Self::new(T::zero(), T::zero(), T::one())
    }

    /// Create a vector from an array.
    #[inline]
    pub fn from_array(arr: [T; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Convert to array.
    #[inline]
    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, rhs: Self) -> T {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    /// Squared euclidean norm.
    #[inline]
    pub fn norm_squared(self) -> T {
        self.dot(self)
    }

    /// Euclidean norm.
    #[inline]
    pub fn norm(self) -> T {
        self.norm_squared().sqrt()
    }

    /// Unit vector in the same direction; returned unchanged when the norm is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let norm = self.norm();
        if norm > T::zero() {
            self / norm
        } else {
            self
        }
    }

    /// Unit vector in the same direction, or `None` if the norm is not above `min_norm`.
    #[inline]
    pub fn try_normalize(self, min_norm: T) -> Option<Self> {
        let norm = self.norm();
        (norm > min_norm).then(|| self / norm)
    }

    /// An arbitrary unit vector orthogonal to `self`.
    ///
    /// Projects on the xy plane unless both x and y are negligible compared to z,
    /// in which case the yz plane is used.
    pub fn unit_orthogonal(self) -> Self {
        let prec = T::dummy_precision();
        if !is_much_smaller_than(self.x, self.z, prec)
            || !is_much_smaller_than(self.y, self.z, prec)
        {
            let inv = T::one() / (self.x * self.x + self.y * self.y).sqrt();
            Self::new(-self.y * inv, self.x * inv, T::zero())
        } else {
            let inv = T::one() / (self.y * self.y + self.z * self.z).sqrt();
            Self::new(T::zero(), -self.z * inv, self.y * inv)
        }
    }
}

impl<T: Real> Index<usize> for Vec3<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

impl<T: Real> IndexMut<usize> for Vec3<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

impl<T: Real> Mat2<T> {
    /// Create a matrix from its rows.
    #[inline]
    pub fn from_rows(rows: [[T; 2]; 2]) -> Self {
        Self(rows)
    }

    /// Create a matrix from column vectors.
    #[inline]
    pub fn from_cols(c0: Vec2<T>, c1: Vec2<T>) -> Self {
        Self([[c0.x, c1.x], [c0.y, c1.y]])
    }

    /// Create a symmetric matrix from its upper triangle.
    #[inline]
    pub fn symmetric(m00: T, m01: T, m11: T) -> Self {
        Self([[m00, m01], [m01, m11]])
    }

    /// The identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self([[T::one(), T::zero()], [T::zero(), T::one()]])
    }

    /// The zero matrix.
    #[inline]
    pub fn zeros() -> Self {
        Self([[T::zero(); 2]; 2])
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec2<T> {
        Vec2::new(self.0[i][0], self.0[i][1])
    }

    /// Column `j`.
    #[inline]
    pub fn col(&self, j: usize) -> Vec2<T> {
        Vec2::new(self.0[0][j], self.0[1][j])
    }

    /// Transposed copy.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self([[self.0[0][0], self.0[1][0]], [self.0[0][1], self.0[1][1]]])
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> T {
        crate::inverse::determinant2x2(self)
    }
}

impl<T: Real> Mat3<T> {
    /// Create a matrix from its rows.
    #[inline]
    pub fn from_rows(rows: [[T; 3]; 3]) -> Self {
        Self(rows)
    }

    /// Create a matrix from row vectors.
    #[inline]
    pub fn from_row_vectors(r0: Vec3<T>, r1: Vec3<T>, r2: Vec3<T>) -> Self {
        Self([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    /// Create a matrix from column vectors.
    #[inline]
    pub fn from_cols(c0: Vec3<T>, c1: Vec3<T>, c2: Vec3<T>) -> Self {
        Self([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    /// Create a symmetric matrix from its upper triangle.
    #[inline]
    pub fn symmetric(m00: T, m01: T, m02: T, m11: T, m12: T, m22: T) -> Self {
        Self([[m00, m01, m02], [m01, m11, m12], [m02, m12, m22]])
    }

    /// Create a diagonal matrix.
    #[inline]
    pub fn from_diagonal(d: Vec3<T>) -> Self {
        let z = T::zero();
        Self([[d.x, z, z], [z, d.y, z], [z, z, d.z]])
    }

    /// The identity matrix.
    #[inline]
    pub fn identity() -> Self {
        Self::from_diagonal(Vec3::new(T::one(), T::one(), T::one()))
    }

    /// The zero matrix.
    #[inline]
    pub fn zeros() -> Self {
        Self([[T::zero(); 3]; 3])
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3<T> {
        Vec3::from_array(self.0[i])
    }

    /// Column `j`.
    #[inline]
    pub fn col(&self, j: usize) -> Vec3<T> {
        Vec3::new(self.0[0][j], self.0[1][j], self.0[2][j])
    }

    /// Overwrite column `j`.
    #[inline]
    pub fn set_col(&mut self, j: usize, c: Vec3<T>) {
        self.0[0][j] = c.x;
        self.0[1][j] = c.y;
        self.0[2][j] = c.z;
    }

    /// The diagonal entries.
    #[inline]
    pub fn diagonal(&self) -> Vec3<T> {
        Vec3::new(self.0[0][0], self.0[1][1], self.0[2][2])
    }

    /// Transposed copy.
    #[inline]
    pub fn transpose(&self) -> Self {
        let m = &self.0;
        Self([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Sum of the diagonal entries.
    #[inline]
    pub fn trace(&self) -> T {
        self.0[0][0] + self.0[1][1] + self.0[2][2]
    }

    /// Largest absolute entry.
    #[inline]
    pub fn max_abs(&self) -> T {
        self.0
            .iter()
            .flatten()
            .fold(T::zero(), |acc, v| acc.max(v.abs()))
    }

    /// Copy of the matrix with `value` subtracted from each diagonal entry.
    #[inline]
    pub fn shifted(&self, value: T) -> Self {
        let mut out = *self;
        for i in 0..3 {
            out.0[i][i] = out.0[i][i] - value;
        }
        out
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> T {
        crate::inverse::determinant3x3(self)
    }

    /// Whether `m[i][j]` and `m[j][i]` agree within `tol` for every pair.
    pub fn is_symmetric(&self, tol: T) -> bool {
        let m = &self.0;
        (m[0][1] - m[1][0]).abs() <= tol
            && (m[0][2] - m[2][0]).abs() <= tol
            && (m[1][2] - m[2][1]).abs() <= tol
    }
}

impl<T> Index<(usize, usize)> for Mat2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.0[i][j]
    }
}

impl<T> IndexMut<(usize, usize)> for Mat2<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.0[i][j]
    }
}

impl<T> Index<(usize, usize)> for Mat3<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.0[i][j]
    }
}

impl<T> IndexMut<(usize, usize)> for Mat3<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.0[i][j]
    }
}

// Vector arithmetic

impl<T: Real> Add for Vec2<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Real> Sub for Vec2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Real> Neg for Vec2<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Real> Mul<T> for Vec2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Real> Div<T> for Vec2<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Real> Add for Vec3<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Real> Sub for Vec3<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Real> Neg for Vec3<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: Real> Mul<T> for Vec3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl<T: Real> Div<T> for Vec3<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

// Matrix arithmetic

impl<T: Real> Mul for Mat2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::zeros();
        for i in 0..2 {
            for j in 0..2 {
                out.0[i][j] = self.0[i][0] * rhs.0[0][j] + self.0[i][1] * rhs.0[1][j];
            }
        }
        out
    }
}

impl<T: Real> Mul<Vec2<T>> for Mat2<T> {
    type Output = Vec2<T>;

    #[inline]
    fn mul(self, v: Vec2<T>) -> Vec2<T> {
        Vec2::new(
            self.0[0][0] * v.x + self.0[0][1] * v.y,
            self.0[1][0] * v.x + self.0[1][1] * v.y,
        )
    }
}

impl<T: Real> Mul<T> for Mat2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, s: T) -> Self {
        Self(self.0.map(|row| row.map(|v| v * s)))
    }
}

impl<T: Real> Div<T> for Mat2<T> {
    type Output = Self;

    #[inline]
    fn div(self, s: T) -> Self {
        Self(self.0.map(|row| row.map(|v| v / s)))
    }
}

impl<T: Real> Mul for Mat3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::zeros();
        for i in 0..3 {
            for j in 0..3 {
                out.0[i][j] = self.0[i][0] * rhs.0[0][j]
                    + self.0[i][1] * rhs.0[1][j]
                    + self.0[i][2] * rhs.0[2][j];
            }
        }
        out
    }
}

impl<T: Real> Mul<Vec3<T>> for Mat3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn mul(self, v: Vec3<T>) -> Vec3<T> {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }
}

impl<T: Real> Mul<T> for Mat3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, s: T) -> Self {
        Self(self.0.map(|row| row.map(|v| v * s)))
    }
}

impl<T: Real> Div<T> for Mat3<T> {
    type Output = Self;

    #[inline]
    fn div(self, s: T) -> Self {
        Self(self.0.map(|row| row.map(|v| v / s)))
    }
}

impl<T: Real> Add for Mat3<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut out = self;
        for i in 0..3 {
            for j in 0..3 {
                out.0[i][j] = out.0[i][j] + rhs.0[i][j];
            }
        }
        out
    }
}

impl<T: Real> Sub for Mat3<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let mut out = self;
        for i in 0..3 {
            for j in 0..3 {
                out.0[i][j] = out.0[i][j] - rhs.0[i][j];
            }
        }
        out
    }
}

// approx support

macro_rules! impl_approx {
    ($ty:ident, |$a:ident, $b:ident| $pairs:expr) => {
        impl<T: Real> AbsDiffEq for $ty<T> {
            type Epsilon = T;

            fn default_epsilon() -> T {
                T::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
                let ($a, $b) = (self, other);
                $pairs
                    .into_iter()
                    .all(|(x, y): (T, T)| x.abs_diff_eq(&y, epsilon))
            }
        }

        impl<T: Real> RelativeEq for $ty<T> {
            fn default_max_relative() -> T {
                T::default_max_relative()
            }

            fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
                let ($a, $b) = (self, other);
                $pairs
                    .into_iter()
                    .all(|(x, y): (T, T)| x.relative_eq(&y, epsilon, max_relative))
            }
        }
    };
}

impl_approx!(Vec2, |a, b| [(a.x, b.x), (a.y, b.y)]);
impl_approx!(Vec3, |a, b| [(a.x, b.x), (a.y, b.y), (a.z, b.z)]);
impl_approx!(Mat2, |a, b| [
    (a.0[0][0], b.0[0][0]),
    (a.0[0][1], b.0[0][1]),
    (a.0[1][0], b.0[1][0]),
    (a.0[1][1], b.0[1][1]),
]);
impl_approx!(Mat3, |a, b| [
    (a.0[0][0], b.0[0][0]),
    (a.0[0][1], b.0[0][1]),
    (a.0[0][2], b.0[0][2]),
    (a.0[1][0], b.0[1][0]),
    (a.0[1][1], b.0[1][1]),
    (a.0[1][2], b.0[1][2]),
    (a.0[2][0], b.0[2][0]),
    (a.0[2][1], b.0[2][1]),
    (a.0[2][2], b.0[2][2]),
]);
