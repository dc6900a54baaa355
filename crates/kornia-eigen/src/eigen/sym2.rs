use super::{EigenCase, EigenPair};
use crate::scalar::Real;
use crate::types::{Mat2, Vec2};

/// Eigen decomposition of a symmetric 2x2 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricEigen2<T> {
    /// Eigenvalues in ascending order.
    pub eigenvalues: Vec2<T>,
    /// Eigenvectors stored as columns, in the order of `eigenvalues`.
    pub eigenvectors: Mat2<T>,
    /// The branch used to compute the decomposition.
    pub case: EigenCase,
}

#[inline]
fn is_diagonal<T: Real>(m: &Mat2<T>) -> bool {
    m[(0, 1)].abs() <= T::min_positive_value()
}

/// Returns `(trace / 2, sqrt(max(trace^2 / 4 - det, 0)))`.
#[inline]
fn half_trace_and_radius<T: Real>(m: &Mat2<T>) -> (T, T) {
    let trace = T::lit(0.5) * (m[(0, 0)] + m[(1, 1)]);
    let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(0, 1)];
    let temp = (trace * trace - det).max(T::zero());
    (trace, temp.sqrt())
}

/// Smallest eigenvalue of a symmetric 2x2 matrix and its eigenvector.
///
/// Only `m[(0, 0)]`, `m[(0, 1)]` and `m[(1, 1)]` are read.
pub fn smallest_eigenpair2<T: Real>(m: &Mat2<T>) -> EigenPair<T, Vec2<T>> {
    if is_diagonal(m) {
        return if m[(0, 0)] < m[(1, 1)] {
            EigenPair {
                value: m[(0, 0)],
                vector: Vec2::new(T::one(), T::zero()),
            }
        } else {
            EigenPair {
                value: m[(1, 1)],
                vector: Vec2::new(T::zero(), T::one()),
            }
        };
    }

    let (trace, radius) = half_trace_and_radius(m);
    let value = trace - radius;
    let vector = Vec2::new(-m[(0, 1)], m[(0, 0)] - value).normalize();

    EigenPair { value, vector }
}

/// Eigen decomposition of a symmetric 2x2 matrix.
///
/// A matrix whose off-diagonal entry is at most the smallest positive normal
/// value is treated as diagonal and decomposed exactly. Otherwise the second
/// eigenvector is the first one rotated by +90 degrees, so the eigenvector
/// matrix is a proper rotation.
///
/// Example:
///
/// ```
/// use kornia_eigen::eigen::symmetric_eigen2;
/// use kornia_eigen::types::{Mat2, Vec2};
///
/// let eig = symmetric_eigen2(&Mat2::symmetric(2.0, 0.0, 5.0));
/// assert_eq!(eig.eigenvalues, Vec2::new(2.0, 5.0));
/// assert_eq!(eig.eigenvectors, Mat2::identity());
/// ```
pub fn symmetric_eigen2<T: Real>(m: &Mat2<T>) -> SymmetricEigen2<T> {
    let (zero, one) = (T::zero(), T::one());

    if is_diagonal(m) {
        let (eigenvalues, eigenvectors) = if m[(0, 0)] < m[(1, 1)] {
            (Vec2::new(m[(0, 0)], m[(1, 1)]), Mat2::identity())
        } else {
            (
                Vec2::new(m[(1, 1)], m[(0, 0)]),
                Mat2::from_rows([[zero, one], [one, zero]]),
            )
        };
        return SymmetricEigen2 {
            eigenvalues,
            eigenvectors,
            case: EigenCase::Diagonal,
        };
    }

    let (trace, radius) = half_trace_and_radius(m);
    let eigenvalues = Vec2::new(trace - radius, trace + radius);

    let v0 = Vec2::new(-m[(0, 1)], m[(0, 0)] - eigenvalues.x).normalize();
    let eigenvectors = Mat2::from_cols(v0, v0.perp());

    SymmetricEigen2 {
        eigenvalues,
        eigenvectors,
        case: EigenCase::AllDistinct,
    }
}
