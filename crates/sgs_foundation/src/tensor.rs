// crates/sgs_foundation/src/tensor.rs

//! 张量代数原语
//!
//! 向量使用 [`glam::DVec3`]，一般二阶张量使用 [`glam::DMat3`]，
//! 对称张量使用本模块的 [`SymmTensor`]（6 个独立分量）。
//!
//! # 约定
//!
//! - 张量分量 `T_ij` 存储为 `DMat3` 的第 `j` 列第 `i` 行
//! - 速度梯度 `(∇U)_ij = ∂U_j/∂x_i`
//! - 双点积 `A:B = Σ_ij A_ij B_ij`
//! - 模 `|A| = √(A:A)`，模平方 `magSqr(A) = A:A`
//!
//! 应变率 `D = dev(symm(∇U))` 的模在动态系数估计与涡粘性计算中
//! 统一使用 `√(D:D)`。

use glam::{DMat3, DVec3};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use crate::constants::ONE_THIRD;

/// 三维向量
pub type Vector = DVec3;

/// 二阶张量
pub type Tensor = DMat3;

/// 三维对称张量
///
/// ```text
/// ┌ xx  xy  xz ┐
/// │ xy  yy  yz │
/// └ xz  yz  zz ┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SymmTensor {
    /// T_xx
    pub xx: f64,
    /// T_xy = T_yx
    pub xy: f64,
    /// T_xz = T_zx
    pub xz: f64,
    /// T_yy
    pub yy: f64,
    /// T_yz = T_zy
    pub yz: f64,
    /// T_zz
    pub zz: f64,
}

impl SymmTensor {
    /// 零张量
    pub const ZERO: Self = Self {
        xx: 0.0,
        xy: 0.0,
        xz: 0.0,
        yy: 0.0,
        yz: 0.0,
        zz: 0.0,
    };

    /// 单位张量
    pub const I: Self = Self {
        xx: 1.0,
        xy: 0.0,
        xz: 0.0,
        yy: 1.0,
        yz: 0.0,
        zz: 1.0,
    };

    /// 由分量创建
    #[inline]
    pub const fn new(xx: f64, xy: f64, xz: f64, yy: f64, yz: f64, zz: f64) -> Self {
        Self { xx, xy, xz, yy, yz, zz }
    }

    /// 各向同性张量 `s·I`
    #[inline]
    pub fn isotropic(s: f64) -> Self {
        Self::I * s
    }

    /// 迹
    #[inline]
    pub fn tr(&self) -> f64 {
        self.xx + self.yy + self.zz
    }

    /// 偏量部分 `T - tr(T)/3·I`
    #[inline]
    pub fn dev(&self) -> Self {
        *self - Self::isotropic(ONE_THIRD * self.tr())
    }

    /// 双点积 `A:B`
    #[inline]
    pub fn double_dot(&self, other: &Self) -> f64 {
        self.xx * other.xx
            + self.yy * other.yy
            + self.zz * other.zz
            + 2.0 * (self.xy * other.xy + self.xz * other.xz + self.yz * other.yz)
    }

    /// 模平方 `A:A`
    #[inline]
    pub fn mag_sqr(&self) -> f64 {
        self.double_dot(self)
    }

    /// 模 `√(A:A)`
    #[inline]
    pub fn mag(&self) -> f64 {
        self.mag_sqr().sqrt()
    }

    /// 所有分量是否有限
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.xx.is_finite()
            && self.xy.is_finite()
            && self.xz.is_finite()
            && self.yy.is_finite()
            && self.yz.is_finite()
            && self.zz.is_finite()
    }

    /// 转换为一般张量
    pub fn to_tensor(&self) -> Tensor {
        DMat3::from_cols(
            DVec3::new(self.xx, self.xy, self.xz),
            DVec3::new(self.xy, self.yy, self.yz),
            DVec3::new(self.xz, self.yz, self.zz),
        )
    }
}

impl Add for SymmTensor {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(
            self.xx + o.xx,
            self.xy + o.xy,
            self.xz + o.xz,
            self.yy + o.yy,
            self.yz + o.yz,
            self.zz + o.zz,
        )
    }
}

impl Sub for SymmTensor {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(
            self.xx - o.xx,
            self.xy - o.xy,
            self.xz - o.xz,
            self.yy - o.yy,
            self.yz - o.yz,
            self.zz - o.zz,
        )
    }
}

impl Neg for SymmTensor {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for SymmTensor {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(
            self.xx * s,
            self.xy * s,
            self.xz * s,
            self.yy * s,
            self.yz * s,
            self.zz * s,
        )
    }
}

impl Mul<SymmTensor> for f64 {
    type Output = SymmTensor;
    #[inline]
    fn mul(self, t: SymmTensor) -> SymmTensor {
        t * self
    }
}

impl Div<f64> for SymmTensor {
    type Output = Self;
    #[inline]
    fn div(self, s: f64) -> Self {
        self * (1.0 / s)
    }
}

impl AddAssign for SymmTensor {
    #[inline]
    fn add_assign(&mut self, o: Self) {
        *self = *self + o;
    }
}

impl SubAssign for SymmTensor {
    #[inline]
    fn sub_assign(&mut self, o: Self) {
        *self = *self - o;
    }
}

// ============================================================
// 自由函数
// ============================================================

/// 向量外积平方 `v⊗v`（对称）
#[inline]
pub fn sqr(v: Vector) -> SymmTensor {
    SymmTensor::new(
        v.x * v.x,
        v.x * v.y,
        v.x * v.z,
        v.y * v.y,
        v.y * v.z,
        v.z * v.z,
    )
}

/// 一般外积 `a⊗b`，分量 `(a⊗b)_ij = a_i b_j`
#[inline]
pub fn outer(a: Vector, b: Vector) -> Tensor {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// 对称部分 `(T + Tᵀ)/2`
#[inline]
pub fn symm(t: &Tensor) -> SymmTensor {
    SymmTensor::new(
        t.comp(0, 0),
        0.5 * (t.comp(0, 1) + t.comp(1, 0)),
        0.5 * (t.comp(0, 2) + t.comp(2, 0)),
        t.comp(1, 1),
        0.5 * (t.comp(1, 2) + t.comp(2, 1)),
        t.comp(2, 2),
    )
}

/// 两倍对称部分 `T + Tᵀ`
#[inline]
pub fn two_symm(t: &Tensor) -> SymmTensor {
    symm(t) * 2.0
}

/// 一般张量的扩展操作
pub trait TensorExt {
    /// 分量 `T_ij`
    fn comp(&self, i: usize, j: usize) -> f64;
    /// 迹
    fn tr(&self) -> f64;
    /// 模平方 `T:T`
    fn mag_sqr(&self) -> f64;
}

impl TensorExt for Tensor {
    #[inline]
    fn comp(&self, i: usize, j: usize) -> f64 {
        self.col(j)[i]
    }

    #[inline]
    fn tr(&self) -> f64 {
        self.x_axis.x + self.y_axis.y + self.z_axis.z
    }

    #[inline]
    fn mag_sqr(&self) -> f64 {
        self.x_axis.length_squared() + self.y_axis.length_squared() + self.z_axis.length_squared()
    }
}
