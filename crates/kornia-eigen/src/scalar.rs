//! Scalar abstraction over single and double precision floats.

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{Float, FloatConst};
use std::fmt::Debug;

/// Floating point scalar accepted by the closed-form kernels.
///
/// Implemented for `f32` and `f64`. The precision constants mirror the usual
/// dense linear algebra conventions: [`Float::epsilon`] is used to detect
/// coincident roots and [`Float::min_positive_value`] to detect entries that
/// are numerically zero.
pub trait Real:
    Float
    + FloatConst
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + AbsDiffEq<Epsilon = Self>
    + RelativeEq
{
    /// Relative precision under which a value is negligible compared to another one.
    fn dummy_precision() -> Self;

    /// Converts an `f64` constant into this scalar type.
    fn lit(v: f64) -> Self;

    /// Widens the value to `f64`.
    fn as_f64(self) -> f64;
}

impl Real for f32 {
    #[inline]
    fn dummy_precision() -> Self {
        1e-5
    }

    #[inline]
    fn lit(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline]
    fn dummy_precision() -> Self {
        1e-12
    }

    #[inline]
    fn lit(v: f64) -> Self {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Returns `true` when `|a| <= |b| * prec`.
#[inline]
pub(crate) fn is_much_smaller_than<T: Real>(a: T, b: T, prec: T) -> bool {
    a.abs() <= b.abs() * prec
}
