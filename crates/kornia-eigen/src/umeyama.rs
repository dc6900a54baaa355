//! Least-squares similarity alignment of point sets (Umeyama).
//!
//! Given correspondences `x_i -> y_i`, finds the scale `c`, rotation `R` and
//! translation `t` minimizing `1/n * sum |y_i - (c * R * x_i + t)|^2`.

// The SVD runs in f64 whatever the input precision, results are cast back.
use crate::scalar::Real;
use crate::transform::Affine3;
use crate::types::{Mat3, Vec3};
use nalgebra::{DMatrix, SVD};
use thiserror::Error;

/// Error type for Umeyama alignment.
#[derive(Debug, Error, PartialEq)]
pub enum UmeyamaError {
    /// Source and destination arrays must have the same length
    #[error("Source and destination arrays must have the same length ({0} != {1})")]
    MismatchedInputLengths(usize, usize),

    /// No correspondences were given
    #[error("Empty input point sets")]
    EmptyInput,

    /// Fewer correspondences than the dimension of the points
    #[error("Need at least {required} correspondences, got {actual}")]
    InsufficientCorrespondences {
        /// Minimum number of correspondences.
        required: usize,
        /// Number of correspondences given.
        actual: usize,
    },

    /// The cross-covariance is too rank deficient to fix a rotation
    #[error("Degenerate correspondences: covariance rank {rank}, need at least {required}")]
    DegenerateCorrespondences {
        /// Numerical rank of the cross-covariance.
        rank: usize,
        /// Minimum rank needed.
        required: usize,
    },

    /// Failed to compute U in SVD
    #[error("Failed to compute U in SVD")]
    SvdU,

    /// Failed to compute V^T in SVD
    #[error("Failed to compute V^T in SVD")]
    SvdVT,
}

/// Parameters for [`umeyama`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UmeyamaParams {
    /// Estimate the scale `c`; when false `c` is fixed to 1.
    pub with_scaling: bool,
    /// Singular values at or below `rank_tolerance * max_singular_value` count as zero.
    pub rank_tolerance: f64,
}

impl Default for UmeyamaParams {
    fn default() -> Self {
        Self {
            with_scaling: false,
            rank_tolerance: 1e-10,
        }
    }
}

/// Similarity transform `p -> scale * rotation * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity<T, const D: usize> {
    /// Rotation matrix, row-major, determinant +1.
    pub rotation: [[T; D]; D],
    /// Translation vector.
    pub translation: [T; D],
    /// Uniform scale, 1 for rigid alignment.
    pub scale: T,
}

impl<T: Real, const D: usize> Similarity<T, D> {
    /// Apply the transform to a point.
    pub fn transform_point(&self, p: &[T; D]) -> [T; D] {
        let mut out = self.translation;
        for (o, row) in out.iter_mut().zip(self.rotation.iter()) {
            let rp = row
                .iter()
                .zip(p.iter())
                .fold(T::zero(), |acc, (&r, &x)| acc + r * x);
            *o = *o + self.scale * rp;
        }
        out
    }
}

impl<T: Real> Similarity<T, 2> {
    /// Homogeneous 3x3 matrix `[[c*R, t], [0, 1]]`.
    pub fn to_matrix3(&self) -> Mat3<T> {
        let (r, t, c) = (&self.rotation, &self.translation, self.scale);
        Mat3::from_rows([
            [c * r[0][0], c * r[0][1], t[0]],
            [c * r[1][0], c * r[1][1], t[1]],
            [T::zero(), T::zero(), T::one()],
        ])
    }
}

impl<T: Real> Similarity<T, 3> {
    /// Convert to an [`Affine3`] whose linear part is `scale * rotation`.
    pub fn to_affine(&self) -> Affine3<T> {
        Affine3::new(
            Mat3(self.rotation) * self.scale,
            Vec3::from_array(self.translation),
        )
    }
}

/// Umeyama alignment of `D`-dimensional point sets.
///
/// Fails when the inputs differ in length, are empty, have fewer than `D`
/// points, or span less than a `D - 1` dimensional subspace.
///
/// Example:
///
/// ```
/// use kornia_eigen::umeyama::{umeyama, UmeyamaParams};
///
/// let src: [[f64; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
/// let dst = [[1.0, 1.0], [1.0, 2.0], [0.0, 1.0]];
/// let sim = umeyama(&src, &dst, &UmeyamaParams::default())?;
/// assert!((sim.rotation[1][0] - 1.0).abs() < 1e-9);
/// # Ok::<(), kornia_eigen::umeyama::UmeyamaError>(())
/// ```
pub fn umeyama<T: Real, const D: usize>(
    src: &[[T; D]],
    dst: &[[T; D]],
    params: &UmeyamaParams,
) -> Result<Similarity<T, D>, UmeyamaError> {
    if src.len() != dst.len() {
        return Err(UmeyamaError::MismatchedInputLengths(src.len(), dst.len()));
    }
    if src.is_empty() {
        return Err(UmeyamaError::EmptyInput);
    }
    if src.len() < D {
        return Err(UmeyamaError::InsufficientCorrespondences {
            required: D,
            actual: src.len(),
        });
    }
    let n = src.len() as f64;

    // centroids
    let mut mu_s = [0.0f64; D];
    let mut mu_d = [0.0f64; D];
    for (s, d) in src.iter().zip(dst.iter()) {
        for k in 0..D {
            mu_s[k] += s[k].as_f64();
            mu_d[k] += d[k].as_f64();
        }
    }
    for k in 0..D {
        mu_s[k] /= n;
        mu_d[k] /= n;
    }

    // sigma = 1/n * sum (dst_c)(src_c)^T, and the source variance
    let mut sigma = DMatrix::<f64>::zeros(D, D);
    let mut src_var = 0.0f64;
    for (s, d) in src.iter().zip(dst.iter()) {
        let mut sc = [0.0f64; D];
        for k in 0..D {
            sc[k] = s[k].as_f64() - mu_s[k];
            src_var += sc[k] * sc[k];
        }
        for r in 0..D {
            let dc_r = d[r].as_f64() - mu_d[r];
            for (c, &sc_c) in sc.iter().enumerate() {
                sigma[(r, c)] += dc_r * sc_c;
            }
        }
    }
    sigma /= n;
    src_var /= n;

    let SVD {
        u,
        v_t,
        singular_values,
    } = sigma.svd(true, true);
    let Some(u) = u else {
        return Err(UmeyamaError::SvdU);
    };
    let Some(v_t) = v_t else {
        return Err(UmeyamaError::SvdVT);
    };

    let s_max = singular_values.iter().fold(0.0f64, |acc, &s| acc.max(s));
    let rank = singular_values
        .iter()
        .filter(|&&s| s > params.rank_tolerance * s_max)
        .count();
    let required = D.saturating_sub(1);
    if rank < required || src_var <= 0.0 {
        return Err(UmeyamaError::DegenerateCorrespondences { rank, required });
    }

    // S = I, except for the smallest singular value when U * V^T is a reflection
    let mut signs = [1.0f64; D];
    if u.determinant() * v_t.determinant() < 0.0 {
        let smallest = singular_values
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |best, (i, &s)| {
                if s < best.1 {
                    (i, s)
                } else {
                    best
                }
            })
            .0;
        signs[smallest] = -1.0;
        log::debug!("umeyama: reflection corrected on singular value {smallest}");
    }

    let mut rotation = [[0.0f64; D]; D];
    for (i, row) in rotation.iter_mut().enumerate() {
        for (j, r_ij) in row.iter_mut().enumerate() {
            *r_ij = (0..D).map(|k| u[(i, k)] * signs[k] * v_t[(k, j)]).sum();
        }
    }

    let scale = if params.with_scaling {
        let weighted: f64 = (0..D).map(|k| singular_values[k] * signs[k]).sum();
        weighted / src_var
    } else {
        1.0
    };

    let mut translation = [T::zero(); D];
    for (i, t_i) in translation.iter_mut().enumerate() {
        let r_mu: f64 = (0..D).map(|j| rotation[i][j] * mu_s[j]).sum();
        *t_i = T::lit(mu_d[i] - scale * r_mu);
    }

    log::debug!(
        "umeyama: {} correspondences, rank {rank}, scale {scale}",
        src.len()
    );

    Ok(Similarity {
        rotation: rotation.map(|row| row.map(T::lit)),
        translation,
        scale: T::lit(scale),
    })
}

/// Umeyama alignment of 3D points, returned as an [`Affine3`].
///
/// With scaling the linear part is `c * R`, otherwise it is the rotation.
pub fn umeyama3<T: Real>(
    src: &[Vec3<T>],
    dst: &[Vec3<T>],
    with_scaling: bool,
) -> Result<Affine3<T>, UmeyamaError> {
    let src = src.iter().map(|p| p.to_array()).collect::<Vec<_>>();
    let dst = dst.iter().map(|p| p.to_array()).collect::<Vec<_>>();
    let params = UmeyamaParams {
        with_scaling,
        ..Default::default()
    };
    Ok(umeyama(&src, &dst, &params)?.to_affine())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rot_z90() -> Mat3<f64> {
        Mat3::from_rows([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]])
    }

    fn apply(c: f64, r: &Mat3<f64>, t: Vec3<f64>, pts: &[Vec3<f64>]) -> Vec<Vec3<f64>> {
        pts.iter().map(|&p| *r * p * c + t).collect()
    }

    #[test]
    fn test_umeyama_scale_rotation_translation() -> Result<(), UmeyamaError> {
        let src = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let t = Vec3::new(1.0, 2.0, 3.0);
        let dst = apply(2.0, &rot_z90(), t, &src);

        let sim = umeyama(
            &src.map(|p| p.to_array()),
            &dst.iter().map(|p| p.to_array()).collect::<Vec<_>>(),
            &UmeyamaParams {
                with_scaling: true,
                ..Default::default()
            },
        )?;
        assert_relative_eq!(sim.scale, 2.0, epsilon = 1e-9);
        assert_relative_eq!(Mat3(sim.rotation), rot_z90(), epsilon = 1e-9);
        assert_relative_eq!(Vec3::from_array(sim.translation), t, epsilon = 1e-9);

        let affine = sim.to_affine();
        for (s, d) in src.iter().zip(dst.iter()) {
            assert_relative_eq!(affine.transform_point(*s), *d, epsilon = 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_umeyama_rigid_coplanar() -> Result<(), UmeyamaError> {
        // square in the z = 0 plane, the covariance has rank 2
        let src = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let t = Vec3::new(0.5, -0.3, 2.0);
        let dst = apply(1.0, &rot_z90(), t, &src);

        let est = umeyama3(&src, &dst, false)?;
        assert_relative_eq!(est.linear, rot_z90(), epsilon = 1e-9);
        assert_relative_eq!(est.translation, t, epsilon = 1e-9);
        assert!(est.rotation_is_orthonormal(1e-9));
        Ok(())
    }

    #[test]
    fn test_umeyama_reflection_gives_rotation() -> Result<(), UmeyamaError> {
        let src = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ];
        // mirror through the x = 0 plane, no rotation reproduces it
        let dst = src.map(|p| Vec3::new(-p.x, p.y, p.z));
        let est = umeyama3(&src, &dst, false)?;
        assert!(est.rotation_is_orthonormal(1e-9));
        assert_relative_eq!(est.linear.determinant(), 1.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_umeyama_single_precision() -> Result<(), UmeyamaError> {
        let src = [
            Vec3::new(0.0f32, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let t = Vec3::new(1.0f32, 2.0, 3.0);
        let dst = src.map(|p| Vec3::new(-p.y, p.x, p.z) * 2.0 + t);
        let est = umeyama3(&src, &dst, true)?;
        let expected = Mat3::from_rows([[0.0f32, -2.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 2.0]]);
        assert_relative_eq!(est.linear, expected, epsilon = 1e-5);
        assert_relative_eq!(est.translation, t, epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn test_umeyama_2d() -> Result<(), UmeyamaError> {
        let theta = std::f64::consts::FRAC_PI_6;
        let (s, c) = theta.sin_cos();
        let (scale, t) = (0.5, [3.0, -1.0]);
        let src = [[0.0, 0.0], [2.0, 0.0], [2.0, 1.0], [-1.0, 4.0]];
        let dst = src.map(|[x, y]| {
            [
                scale * (c * x - s * y) + t[0],
                scale * (s * x + c * y) + t[1],
            ]
        });

        let sim = umeyama(
            &src,
            &dst,
            &UmeyamaParams {
                with_scaling: true,
                ..Default::default()
            },
        )?;
        assert_relative_eq!(sim.scale, scale, epsilon = 1e-9);
        for (p, q) in src.iter().zip(dst.iter()) {
            let out = sim.transform_point(p);
            assert_relative_eq!(out[0], q[0], epsilon = 1e-9);
            assert_relative_eq!(out[1], q[1], epsilon = 1e-9);
        }

        let m = sim.to_matrix3();
        assert_relative_eq!(m[(1, 0)], scale * s, epsilon = 1e-9);
        assert_relative_eq!(m[(0, 2)], t[0], epsilon = 1e-9);
        assert_eq!(m.row(2), Vec3::new(0.0, 0.0, 1.0));
        Ok(())
    }

    #[test]
    fn test_umeyama_errors() {
        let params = UmeyamaParams::default();
        let a = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];

        assert_eq!(
            umeyama(&a, &a[..2], &params),
            Err(UmeyamaError::MismatchedInputLengths(3, 2))
        );
        assert_eq!(
            umeyama::<f64, 3>(&[], &[], &params),
            Err(UmeyamaError::EmptyInput)
        );
        assert_eq!(
            umeyama(&a[..2], &a[..2], &params),
            Err(UmeyamaError::InsufficientCorrespondences {
                required: 3,
                actual: 2
            })
        );
        // collinear points leave the rotation about the line undetermined
        assert_eq!(
            umeyama(&a, &a, &params),
            Err(UmeyamaError::DegenerateCorrespondences {
                rank: 1,
                required: 2
            })
        );
        let same = [[1.0, 1.0, 1.0]; 4];
        assert_eq!(
            umeyama(&same, &same, &params),
            Err(UmeyamaError::DegenerateCorrespondences {
                rank: 0,
                required: 2
            })
        );
    }
}
