#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Eigen
//!
//! Closed-form kernels on 2x2 and 3x3 matrices used across 3D vision code:
//! normal estimation, covariance analysis and point set registration.
//!
//! ## Key Features
//!
//! - **Symmetric eigen decomposition**: non-iterative 2x2 and 3x3 solvers that
//!   report which branch (distinct or repeated eigenvalues) was taken
//! - **Inversion**: cofactor inverses returning the determinant alongside
//! - **Rigid transforms**: frames from axis directions and XYZ Euler angles
//! - **Umeyama**: least-squares similarity between corresponding point sets
//!
//! Every kernel is generic over `f32` and `f64` through [`scalar::Real`].
//!
//! ## Example: smallest eigenvector of a covariance
//!
//! ```rust
//! use kornia_eigen::eigen::smallest_eigenpair3;
//! use kornia_eigen::types::Mat3;
//!
//! // points spread in the xy plane, the normal is the z axis
//! let cov: Mat3<f64> = Mat3::symmetric(2.0, 0.1, 0.0, 1.0, 0.0, 1e-3);
//! let normal = smallest_eigenpair3(&cov);
//! assert!((normal.vector.z.abs() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Example: aligning two point sets
//!
//! ```rust
//! use kornia_eigen::types::Vec3;
//! use kornia_eigen::umeyama::umeyama3;
//!
//! let src = [
//!     Vec3::new(0.0, 0.0, 0.0),
//!     Vec3::new(1.0, 0.0, 0.0),
//!     Vec3::new(0.0, 1.0, 0.0),
//!     Vec3::new(0.0, 0.0, 1.0),
//! ];
//! let t = Vec3::new(1.0, 2.0, 3.0);
//! let dst = src.map(|p| p + t);
//!
//! let affine = umeyama3(&src, &dst, false)?;
//! assert!((affine.translation - t).norm() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod eigen;
pub mod inverse;
mod interop;
pub mod roots;
pub mod scalar;
pub mod transform;
pub mod types;
pub mod umeyama;

pub use eigen::EigenCase;
pub use scalar::Real;
pub use transform::{Affine3, EulerAngles};
pub use types::{Mat2, Mat3, Vec2, Vec3};
pub use umeyama::{UmeyamaError, UmeyamaParams};
