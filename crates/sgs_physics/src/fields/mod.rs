// crates/sgs_physics/src/fields/mod.rs

//! 有限体积场
//!
//! - [`VolField`]: 单元中心场 + 边界面值 + 每个边界片的边界条件
//! - [`SurfaceField`]: 面场（内部面在前，边界面在后）
//! - [`algebra`]: 逐元素运算（`dev`、`symm`、`sqr`、`mag`、双点积、`max` 等）
//!
//! 场值类型由 [`FieldValue`] 约束，目前实现于标量、向量、对称张量和一般张量。

pub mod algebra;
pub mod boundary;
pub mod surface_field;
pub mod vol_field;

pub use boundary::BoundaryCondition;
pub use surface_field::{SurfaceField, SurfaceScalarField};
pub use vol_field::{VolField, VolScalarField, VolSymmTensorField, VolTensorField, VolVectorField};

use glam::{DMat3, DVec3};
use sgs_foundation::tensor::{SymmTensor, TensorExt};
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// 场值类型
///
/// 注意 `glam::DMat3::default()` 是单位阵，因此零值统一使用 [`FieldValue::ZERO`]。
pub trait FieldValue:
    Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + 'static
{
    /// 零值
    const ZERO: Self;

    /// 模平方（张量为双点积 `A:A`）
    fn magnitude_sqr(&self) -> f64;

    /// 所有分量是否有限
    fn is_finite_value(&self) -> bool;
}

impl FieldValue for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn magnitude_sqr(&self) -> f64 {
        self * self
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DVec3 {
    const ZERO: Self = DVec3::ZERO;

    #[inline]
    fn magnitude_sqr(&self) -> f64 {
        self.length_squared()
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for SymmTensor {
    const ZERO: Self = SymmTensor::ZERO;

    #[inline]
    fn magnitude_sqr(&self) -> f64 {
        self.mag_sqr()
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

impl FieldValue for DMat3 {
    const ZERO: Self = DMat3::ZERO;

    #[inline]
    fn magnitude_sqr(&self) -> f64 {
        TensorExt::mag_sqr(self)
    }

    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values() {
        assert_eq!(<f64 as FieldValue>::ZERO, 0.0);
        assert_eq!(<DMat3 as FieldValue>::ZERO.magnitude_sqr(), 0.0);
        // 单位阵不是零
        assert_eq!(DMat3::default().magnitude_sqr(), 3.0);
    }

    #[test]
    fn test_magnitude_sqr() {
        assert_eq!(DVec3::new(1.0, 2.0, 2.0).magnitude_sqr(), 9.0);
        assert_eq!(SymmTensor::I.magnitude_sqr(), 3.0);
        assert!(!f64::NAN.is_finite_value());
    }
}
