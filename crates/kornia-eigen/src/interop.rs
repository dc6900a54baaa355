// Conversions between the crate types and `glam`, for f32 and f64.
//
// Our matrices are row-major while glam stores columns, so every conversion
// goes through rows explicitly.

use crate::transform::Affine3;
use crate::types::{Mat2, Mat3, Vec2, Vec3};

macro_rules! impl_glam_conversions {
    ($scalar:ty, $gvec2:ty, $gvec3:ty, $gmat2:ty, $gmat3:ty, $gaffine:ty) => {
        impl From<$gvec2> for Vec2<$scalar> {
            #[inline]
            fn from(v: $gvec2) -> Self {
                Self::new(v.x, v.y)
            }
        }

        impl From<Vec2<$scalar>> for $gvec2 {
            #[inline]
            fn from(v: Vec2<$scalar>) -> Self {
                <$gvec2>::new(v.x, v.y)
            }
        }

        impl From<$gvec3> for Vec3<$scalar> {
            #[inline]
            fn from(v: $gvec3) -> Self {
                Self::new(v.x, v.y, v.z)
            }
        }

        impl From<Vec3<$scalar>> for $gvec3 {
            #[inline]
            fn from(v: Vec3<$scalar>) -> Self {
                <$gvec3>::new(v.x, v.y, v.z)
            }
        }

        impl From<$gmat2> for Mat2<$scalar> {
            #[inline]
            fn from(m: $gmat2) -> Self {
                Self::from_rows([m.row(0).to_array(), m.row(1).to_array()])
            }
        }

        impl From<Mat2<$scalar>> for $gmat2 {
            #[inline]
            fn from(m: Mat2<$scalar>) -> Self {
                <$gmat2>::from_cols(m.col(0).into(), m.col(1).into())
            }
        }

        impl From<$gmat3> for Mat3<$scalar> {
            #[inline]
            fn from(m: $gmat3) -> Self {
                Self::from_rows([
                    m.row(0).to_array(),
                    m.row(1).to_array(),
                    m.row(2).to_array(),
                ])
            }
        }

        impl From<Mat3<$scalar>> for $gmat3 {
            #[inline]
            fn from(m: Mat3<$scalar>) -> Self {
                <$gmat3>::from_cols(m.col(0).into(), m.col(1).into(), m.col(2).into())
            }
        }

        impl From<$gaffine> for Affine3<$scalar> {
            #[inline]
            fn from(a: $gaffine) -> Self {
                let linear: $gmat3 = a.matrix3.into();
                let translation: $gvec3 = a.translation.into();
                Self::new(linear.into(), translation.into())
            }
        }

        impl From<Affine3<$scalar>> for $gaffine {
            #[inline]
            fn from(a: Affine3<$scalar>) -> Self {
                <$gaffine>::from_mat3_translation(a.linear.into(), a.translation.into())
            }
        }
    };
}

impl_glam_conversions!(
    f32,
    glam::Vec2,
    glam::Vec3,
    glam::Mat2,
    glam::Mat3,
    glam::Affine3A
);
impl_glam_conversions!(
    f64,
    glam::DVec2,
    glam::DVec3,
    glam::DMat2,
    glam::DMat3,
    glam::DAffine3
);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mat3_layout() {
        let m = Mat3::from_rows([[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let g: glam::Mat3 = m.into();
        assert_eq!(g.x_axis, glam::Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(g.row(0), glam::Vec3::new(1.0, 2.0, 3.0));

        let v = Vec3::new(0.5f32, -1.0, 2.0);
        let gv: glam::Vec3 = v.into();
        assert_eq!(Vec3::from(g * gv), m * v);
        assert_eq!(Mat3::from(g), m);
    }

    #[test]
    fn test_mat2_layout() {
        let m = Mat2::from_rows([[1.0f64, 2.0], [3.0, 4.0]]);
        let g: glam::DMat2 = m.into();
        assert_eq!(g.row(1), glam::DVec2::new(3.0, 4.0));
        assert_eq!(Mat2::from(g), m);
        assert_eq!(Vec2::from(glam::DVec2::new(1.0, 2.0)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_affine_matches_glam() {
        let a = Affine3::from_translation_euler(1.0, -2.0, 0.5, 0.3, -0.2, 1.1);
        let g: glam::DAffine3 = a.into();
        let p = Vec3::new(0.25, 4.0, -3.0);
        let gp = g.transform_point3(p.into());
        assert_relative_eq!(Vec3::from(gp), a.transform_point(p), epsilon = 1e-12);
        assert_eq!(Affine3::from(g), a);

        let a32 = Affine3::from_translation_euler(1.0f32, 2.0, 3.0, 0.1, 0.2, 0.3);
        let g32: glam::Affine3A = a32.into();
        assert_relative_eq!(Affine3::from(g32).linear, a32.linear, epsilon = 1e-6);
        assert_eq!(Affine3::from(g32).translation, a32.translation);
    }
}
