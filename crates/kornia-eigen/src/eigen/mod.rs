//! Closed-form eigen decomposition of small symmetric matrices.

mod sym2;
mod sym3;

pub use sym2::{smallest_eigenpair2, symmetric_eigen2, SymmetricEigen2};
pub use sym3::{
    eigenvalues3, eigenvector_for, smallest_eigenpair3, symmetric_eigen3, SymmetricEigen3,
};

/// Branch taken by a closed-form eigen solver.
///
/// Reported alongside the decomposition so that callers can tell how the
/// eigenvectors were obtained, e.g. whether they are unique up to sign or an
/// arbitrary basis of a repeated eigenspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EigenCase {
    /// The off-diagonal entries vanish; eigenvectors are the standard basis.
    Diagonal,
    /// All eigenvalues coincide; eigenvectors are the standard basis.
    AllEqual,
    /// The two smallest eigenvalues coincide.
    TwoRootsEqualLow,
    /// The two largest eigenvalues coincide.
    TwoRootsEqualHigh,
    /// All eigenvalues are distinct.
    AllDistinct,
}

/// An eigenvalue with its unit eigenvector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenPair<T, V> {
    /// The eigenvalue.
    pub value: T,
    /// The eigenvector, normalized unless it is numerically zero.
    pub vector: V,
}
