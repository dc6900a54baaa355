use super::{EigenCase, EigenPair};
use crate::roots::solve_cubic_characteristic;
use crate::scalar::Real;
use crate::types::{Mat3, Vec3};

/// Eigen decomposition of a symmetric 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricEigen3<T> {
    /// Eigenvalues in ascending order.
    pub eigenvalues: Vec3<T>,
    /// Orthonormal eigenvectors stored as columns, in the order of `eigenvalues`.
    /// The matrix is a proper rotation (determinant +1).
    pub eigenvectors: Mat3<T>,
    /// The branch used to compute the decomposition.
    pub case: EigenCase,
}

/// Factor bringing the entries of `m` into `[-1, 1]`.
#[inline]
fn scale_factor<T: Real>(m: &Mat3<T>) -> T {
    let scale = m.max_abs();
    if scale <= T::min_positive_value() {
        T::one()
    } else {
        scale
    }
}

/// Null-space direction of a rank deficient symmetric matrix.
///
/// Returns the unnormalized pairwise row cross product with the largest
/// squared norm, together with that squared norm.
#[inline]
fn best_row_cross<T: Real>(shifted: &Mat3<T>) -> (Vec3<T>, T) {
    let (r0, r1, r2) = (shifted.row(0), shifted.row(1), shifted.row(2));
    let vec1 = r0.cross(r1);
    let vec2 = r0.cross(r2);
    let vec3 = r1.cross(r2);
    let len1 = vec1.norm_squared();
    let len2 = vec2.norm_squared();
    let len3 = vec3.norm_squared();

    if len1 >= len2 && len1 >= len3 {
        (vec1, len1)
    } else if len2 >= len1 && len2 >= len3 {
        (vec2, len2)
    } else {
        (vec3, len3)
    }
}

/// Unit vector in the null space of `shifted` and the confidence of the estimate.
///
/// When every row cross product vanishes the null space is at least two
/// dimensional and any unit vector orthogonal to the dominant row is returned.
fn null_vector<T: Real>(shifted: &Mat3<T>) -> (Vec3<T>, T) {
    let (vec, len) = best_row_cross(shifted);
    if len > T::min_positive_value() {
        return (vec / len.sqrt(), len);
    }

    let dominant = (0..3)
        .map(|i| shifted.row(i))
        .fold(Vec3::zeros(), |best, r| {
            if r.norm_squared() > best.norm_squared() {
                r
            } else {
                best
            }
        });
    log::trace!("degenerate null space, completing from dominant row {dominant:?}");
    if dominant.norm_squared() > T::min_positive_value() {
        (dominant.unit_orthogonal(), len)
    } else {
        (Vec3::unit_z(), len)
    }
}

/// Unit eigenvector of the symmetric matrix `m` for a known `eigenvalue`.
pub fn eigenvector_for<T: Real>(m: &Mat3<T>, eigenvalue: T) -> Vec3<T> {
    let scale = scale_factor(m);
    let scaled = *m / scale;
    null_vector(&scaled.shifted(eigenvalue / scale)).0
}

/// Smallest eigenvalue of a symmetric positive semi-definite 3x3 matrix and its eigenvector.
///
/// Only the upper triangle of `m` is used to compute the eigenvalue.
pub fn smallest_eigenpair3<T: Real>(m: &Mat3<T>) -> EigenPair<T, Vec3<T>> {
    let scale = scale_factor(m);
    let scaled = *m / scale;
    let roots = solve_cubic_characteristic(&scaled);
    let (vector, _) = null_vector(&scaled.shifted(roots.x));

    EigenPair {
        value: roots.x * scale,
        vector,
    }
}

/// Eigenvalues of a symmetric positive semi-definite 3x3 matrix, in ascending order.
pub fn eigenvalues3<T: Real>(m: &Mat3<T>) -> Vec3<T> {
    let scale = scale_factor(m);
    solve_cubic_characteristic(&(*m / scale)) * scale
}

fn classify<T: Real>(evals: &Vec3<T>) -> EigenCase {
    let eps = T::epsilon();
    if evals.z - evals.x <= eps {
        EigenCase::AllEqual
    } else if evals.y - evals.x <= eps {
        EigenCase::TwoRootsEqualLow
    } else if evals.z - evals.y <= eps {
        EigenCase::TwoRootsEqualHigh
    } else {
        EigenCase::AllDistinct
    }
}

/// Orthonormal eigenvectors of the scaled matrix for the given branch.
fn eigenvectors_for_case<T: Real>(scaled: &Mat3<T>, evals: &Vec3<T>, case: EigenCase) -> Mat3<T> {
    let mut evecs = Mat3::identity();
    match case {
        EigenCase::AllEqual | EigenCase::Diagonal => {}
        EigenCase::TwoRootsEqualLow => {
            log::trace!("two smallest eigenvalues coincide: {evals:?}");
            let (v2, _) = null_vector(&scaled.shifted(evals.z));
            let v1 = v2.unit_orthogonal();
            evecs.set_col(2, v2);
            evecs.set_col(1, v1);
            evecs.set_col(0, v1.cross(v2));
        }
        EigenCase::TwoRootsEqualHigh => {
            log::trace!("two largest eigenvalues coincide: {evals:?}");
            let (v0, _) = null_vector(&scaled.shifted(evals.x));
            let v1 = v0.unit_orthogonal();
            evecs.set_col(0, v0);
            evecs.set_col(1, v1);
            evecs.set_col(2, v0.cross(v1));
        }
        EigenCase::AllDistinct => {
            // confidence of each candidate, the squared norm of its raw cross product
            let mut confidence = [T::zero(); 3];
            let mut min_el = 2;
            let mut max_el = 2;

            for slot in [2usize, 1, 0] {
                let (v, len) = null_vector(&scaled.shifted(evals[slot]));
                evecs.set_col(slot, v);
                confidence[slot] = len;
                if slot != 2 {
                    if len <= confidence[min_el] {
                        min_el = slot;
                    }
                    if len > confidence[max_el] {
                        max_el = slot;
                    }
                }
            }

            // the least reliable candidates are rebuilt from the other two
            let mid_el = 3 - min_el - max_el;
            for el in [min_el, mid_el] {
                let v = evecs
                    .col((el + 1) % 3)
                    .cross(evecs.col((el + 2) % 3))
                    .normalize();
                evecs.set_col(el, v);
            }
        }
    }
    evecs
}

/// Eigen decomposition of a symmetric positive semi-definite 3x3 matrix.
///
/// The matrix is scaled so that its entries lie in `[-1, 1]`, the eigenvalues
/// are found in closed form and the eigenvectors are obtained as null-space
/// directions of the shifted matrix. Coincident eigenvalues are handled by
/// completing an orthonormal basis from the eigenvector of the simple one.
///
/// Example:
///
/// ```
/// use kornia_eigen::eigen::{symmetric_eigen3, EigenCase};
/// use kornia_eigen::types::Mat3;
///
/// let eig = symmetric_eigen3(&Mat3::<f64>::identity());
/// assert_eq!(eig.case, EigenCase::AllEqual);
/// assert_eq!(eig.eigenvectors, Mat3::identity());
/// ```
pub fn symmetric_eigen3<T: Real>(m: &Mat3<T>) -> SymmetricEigen3<T> {
    let scale = scale_factor(m);
    let scaled = *m / scale;
    let evals = solve_cubic_characteristic(&scaled);
    let case = classify(&evals);

    let eigenvectors = eigenvectors_for_case(&scaled, &evals, case);

    SymmetricEigen3 {
        eigenvalues: evals * scale,
        eigenvectors,
        case,
    }
}
