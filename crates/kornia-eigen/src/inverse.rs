//! Closed-form inverse and determinant of 2x2 and 3x3 matrices.
//!
//! The inverse is only produced when the determinant is exactly non-zero. No
//! tolerance is applied: callers that need a conditioning check should inspect
//! [`Inversion::determinant`] themselves.

use crate::scalar::Real;
use crate::types::{Mat2, Mat3};

/// Determinant of a matrix together with its inverse, when it exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inversion<T, M> {
    /// Determinant of the input matrix.
    pub determinant: T,
    /// Inverse of the input matrix, `None` if the determinant is zero.
    pub inverse: Option<M>,
}

impl<T: Real, M> Inversion<T, M> {
    /// Whether the matrix was invertible.
    #[inline]
    pub fn is_invertible(&self) -> bool {
        self.inverse.is_some()
    }
}

/// Determinant of a 2x2 matrix.
#[inline]
pub fn determinant2x2<T: Real>(m: &Mat2<T>) -> T {
    m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
}

/// Inverse of a general 2x2 matrix.
///
/// Example:
///
/// ```
/// use kornia_eigen::inverse::invert2x2;
/// use kornia_eigen::types::Mat2;
///
/// let inv = invert2x2(&Mat2::from_rows([[4.0, 7.0], [2.0, 6.0]]));
/// assert_eq!(inv.determinant, 10.0);
/// assert!(inv.is_invertible());
/// ```
pub fn invert2x2<T: Real>(m: &Mat2<T>) -> Inversion<T, Mat2<T>> {
    let det = determinant2x2(m);
    let inverse = (det != T::zero()).then(|| {
        Mat2::from_rows([[m[(1, 1)], -m[(0, 1)]], [-m[(1, 0)], m[(0, 0)]]]) / det
    });

    Inversion {
        determinant: det,
        inverse,
    }
}

/// Inverse of a symmetric 3x3 matrix.
///
/// Only the upper triangle of `m` is read; the result is a full symmetric matrix.
pub fn invert3x3_symmetric<T: Real>(m: &Mat3<T>) -> Inversion<T, Mat3<T>> {
    // | a b c |-1             |   fd-ee    ce-bf   be-cd  |
    // | b d e |    =  1/det * |   ce-bf    af-cc   bc-ae  |
    // | c e f |               |   be-cd    bc-ae   ad-bb  |
    let (a, b, c) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
    let (d, e, f) = (m[(1, 1)], m[(1, 2)], m[(2, 2)]);

    let fd_ee = d * f - e * e;
    let ce_bf = c * e - b * f;
    let be_cd = b * e - c * d;
    let det = a * fd_ee + b * ce_bf + c * be_cd;

    let inverse = (det != T::zero()).then(|| {
        let af_cc = a * f - c * c;
        let bc_ae = b * c - a * e;
        let ad_bb = a * d - b * b;
        Mat3::from_rows([
            [fd_ee, ce_bf, be_cd],
            [ce_bf, af_cc, bc_ae],
            [be_cd, bc_ae, ad_bb],
        ]) / det
    });

    Inversion {
        determinant: det,
        inverse,
    }
}

/// First-row cofactors of a 3x3 matrix.
#[inline]
fn first_row_cofactors<T: Real>(m: &Mat3<T>) -> [T; 3] {
    [
        m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
        m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
        m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
    ]
}

/// Determinant of a general 3x3 matrix, expanded along the first row.
#[inline]
pub fn determinant3x3<T: Real>(m: &Mat3<T>) -> T {
    let [c00, c01, c02] = first_row_cofactors(m);
    m[(0, 0)] * c00 + m[(0, 1)] * c01 + m[(0, 2)] * c02
}

/// Inverse of a general 3x3 matrix through its adjugate.
///
/// The returned determinant is bit-for-bit the value of [`determinant3x3`].
pub fn invert3x3<T: Real>(m: &Mat3<T>) -> Inversion<T, Mat3<T>> {
    let [c00, c01, c02] = first_row_cofactors(m);
    let det = m[(0, 0)] * c00 + m[(0, 1)] * c01 + m[(0, 2)] * c02;

    let inverse = (det != T::zero()).then(|| {
        let (a, b, c) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
        let (d, e, f) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
        let (g, h, i) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);
        Mat3::from_rows([
            [c00, c * h - b * i, b * f - c * e],
            [c01, a * i - c * g, c * d - a * f],
            [c02, b * g - a * h, a * e - b * d],
        ]) / det
    });

    Inversion {
        determinant: det,
        inverse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invert2x2() -> Result<(), Box<dyn std::error::Error>> {
        let m = Mat2::from_rows([[4.0, 7.0], [2.0, 6.0]]);
        let inv = invert2x2(&m).inverse.ok_or("singular")?;
        assert_relative_eq!(m * inv, Mat2::identity(), epsilon = 1e-12);
        assert_relative_eq!(inv * m, Mat2::identity(), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_invert2x2_singular() {
        let inv = invert2x2(&Mat2::from_rows([[1.0f32, 2.0], [2.0, 4.0]]));
        assert_eq!(inv.determinant, 0.0);
        assert!(inv.inverse.is_none());
        assert!(!inv.is_invertible());
    }

    #[test]
    fn test_invert3x3_symmetric() -> Result<(), Box<dyn std::error::Error>> {
        let m = Mat3::symmetric(4.0, 1.0, 0.5, 3.0, 0.25, 2.0);
        let res = invert3x3_symmetric(&m);
        assert_relative_eq!(res.determinant, determinant3x3(&m), epsilon = 1e-12);
        let inv = res.inverse.ok_or("singular")?;
        assert_relative_eq!(m * inv, Mat3::identity(), epsilon = 1e-12);
        assert!(inv.is_symmetric(0.0));
        Ok(())
    }

    #[test]
    fn test_invert3x3_symmetric_reads_upper_triangle() -> Result<(), Box<dyn std::error::Error>> {
        let full = Mat3::symmetric(4.0, 1.0, 0.5, 3.0, 0.25, 2.0);
        let mut upper = full;
        upper[(1, 0)] = 100.0;
        upper[(2, 0)] = -3.0;
        upper[(2, 1)] = 42.0;
        let a = invert3x3_symmetric(&full).inverse.ok_or("singular")?;
        let b = invert3x3_symmetric(&upper).inverse.ok_or("singular")?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn test_invert3x3_general() -> Result<(), Box<dyn std::error::Error>> {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let res = invert3x3(&m);
        assert_eq!(res.determinant, determinant3x3(&m));
        assert_eq!(res.determinant, 1.0);
        let inv = res.inverse.ok_or("singular")?;
        let expected = Mat3::from_rows([[-24.0, 18.0, 5.0], [20.0, -15.0, -4.0], [-5.0, 4.0, 1.0]]);
        assert_relative_eq!(inv, expected, epsilon = 1e-12);
        assert_relative_eq!(inv * m, Mat3::identity(), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_invert3x3_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let res = invert3x3(&m);
        assert_eq!(res.determinant, 0.0);
        assert!(res.inverse.is_none());
        assert!(invert3x3_symmetric(&Mat3::<f64>::zeros()).inverse.is_none());
    }

    #[test]
    fn test_determinant_single_precision() {
        let m = Mat3::from_rows([[2.0f32, 0.0, 0.0], [0.0, 3.0, 0.0], [1.0, 0.0, 4.0]]);
        assert_eq!(determinant3x3(&m), 24.0);
        assert_eq!(m.determinant(), 24.0);
    }
}
