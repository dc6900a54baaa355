//! Closed-form roots of the characteristic polynomial of symmetric matrices.

use crate::scalar::Real;
use crate::types::{Mat3, Vec3};

/// Roots of `x^2 - b*x + c = 0`, with a leading zero root.
///
/// The result is `[0, (b - sqrt(d)) / 2, (b + sqrt(d)) / 2]` where
/// `d = b^2 - 4c`. This is the characteristic polynomial of a symmetric 3x3
/// matrix once its smallest eigenvalue is known to vanish, with `b` its trace
/// and `c` the sum of its principal 2x2 minors. A negative discriminant cannot
/// occur for such a matrix and is clamped to zero, yielding a repeated root.
///
/// Example:
///
/// ```
/// use kornia_eigen::roots::solve_quadratic;
///
/// let roots = solve_quadratic(5.0, 6.0);
/// assert_eq!(roots.to_array(), [0.0, 2.0, 3.0]);
/// ```
pub fn solve_quadratic<T: Real>(b: T, c: T) -> Vec3<T> {
    let half = T::lit(0.5);
    let mut d = b * b - T::lit(4.0) * c;
    if d < T::zero() {
        log::trace!("negative discriminant clamped to zero");
        d = T::zero();
    }
    let sd = d.sqrt();
    Vec3::new(T::zero(), half * (b - sd), half * (b + sd))
}

/// Coefficients `(c0, c1, c2)` of the characteristic polynomial
/// `x^3 - c2*x^2 + c1*x - c0` of a symmetric 3x3 matrix.
///
/// `c0` is the determinant, `c1` the sum of the principal 2x2 minors and
/// `c2` the trace. Only the upper triangle of `m` is read.
pub fn characteristic_coefficients<T: Real>(m: &Mat3<T>) -> (T, T, T) {
    let two = T::lit(2.0);
    let (m00, m01, m02) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let (m11, m12, m22) = (m[(1, 1)], m[(1, 2)], m[(2, 2)]);

    let c0 = m00 * m11 * m22 + two * m01 * m02 * m12
        - m00 * m12 * m12
        - m11 * m02 * m02
        - m22 * m01 * m01;
    let c1 = m00 * m11 - m01 * m01 + m00 * m22 - m02 * m02 + m11 * m22 - m12 * m12;
    let c2 = m00 + m11 + m22;

    (c0, c1, c2)
}

/// Eigenvalues of a symmetric positive semi-definite 3x3 matrix, in ascending order.
///
/// Uses the trigonometric solution of the characteristic cubic. When the
/// determinant is below machine epsilon, or when the trigonometric solution
/// yields a non-positive smallest root, the smallest eigenvalue is taken to be
/// zero and the remaining two come from [`solve_quadratic`].
///
/// The input is expected to be positive semi-definite. For indefinite
/// symmetric matrices the result is undefined: a genuinely negative eigenvalue
/// is replaced by zero and the other two roots are not guaranteed to be
/// correct or sorted.
pub fn solve_cubic_characteristic<T: Real>(m: &Mat3<T>) -> Vec3<T> {
    let (c0, c1, c2) = characteristic_coefficients(m);

    // one root is 0 -> quadratic equation
    if c0.abs() < T::epsilon() {
        return solve_quadratic(c2, c1);
    }

    let inv3 = T::one() / T::lit(3.0);
    let sqrt3 = T::lit(3.0).sqrt();
    let two = T::lit(2.0);

    let c2_over_3 = c2 * inv3;
    let a_over_3 = ((c1 - c2 * c2_over_3) * inv3).min(T::zero());
    let half_b = T::lit(0.5) * (c0 + c2_over_3 * (two * c2_over_3 * c2_over_3 - c1));
    let q = (half_b * half_b + a_over_3 * a_over_3 * a_over_3).min(T::zero());

    let rho = (-a_over_3).sqrt();
    let theta = (-q).sqrt().atan2(half_b) * inv3;
    let (sin_theta, cos_theta) = theta.sin_cos();

    let mut roots = Vec3::new(
        c2_over_3 + two * rho * cos_theta,
        c2_over_3 - rho * (cos_theta + sqrt3 * sin_theta),
        c2_over_3 - rho * (cos_theta - sqrt3 * sin_theta),
    );
    sort3(&mut roots);

    // the eigenvalues of a positive semi-definite matrix can not be negative
    if roots.x <= T::zero() {
        log::trace!("non-positive smallest root {:?}, using quadratic branch", roots.x);
        return solve_quadratic(c2, c1);
    }

    roots
}

/// Ascending sort of three values with at most three conditional swaps.
#[inline]
fn sort3<T: Real>(r: &mut Vec3<T>) {
    if r.x >= r.y {
        std::mem::swap(&mut r.x, &mut r.y);
    }
    if r.y >= r.z {
        std::mem::swap(&mut r.y, &mut r.z);
        if r.x >= r.y {
            std::mem::swap(&mut r.x, &mut r.y);
        }
    }
}
