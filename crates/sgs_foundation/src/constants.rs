// crates/sgs_foundation/src/constants.rs

//! 数值下限常量
//!
//! 动态系数估计中所有分母在除法前都被抬升到 [`VSMALL`]。

/// 极小正数，用作分母下限（与双精度 CFD 惯例一致）
pub const VSMALL: f64 = 1.0e-300;

/// 小量，用于几何退化判断
pub const SMALL: f64 = 1.0e-15;

/// 1/3
pub const ONE_THIRD: f64 = 1.0 / 3.0;

/// 2/3
pub const TWO_THIRDS: f64 = 2.0 / 3.0;
