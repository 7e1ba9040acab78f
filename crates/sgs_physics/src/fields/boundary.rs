// crates/sgs_physics/src/fields/boundary.rs

//! 边界条件
//!
//! 每个边界片一个条件，作用于该片全部边界面。

use std::fmt;

/// 体场边界条件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition<T> {
    /// 零梯度：边界值取 owner 单元值
    ZeroGradient,
    /// 固定值
    FixedValue(T),
    /// 计算值：边界值由产生该场的运算给出，校正时保持不变
    Calculated,
}

impl<T: Copy> BoundaryCondition<T> {
    /// 计算边界面的新值
    #[inline]
    pub fn evaluate(&self, owner_value: T, current: T) -> T {
        match self {
            Self::ZeroGradient => owner_value,
            Self::FixedValue(v) => *v,
            Self::Calculated => current,
        }
    }

    /// 是否为固定值（赋值时不被覆盖）
    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::FixedValue(_))
    }

    /// 类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ZeroGradient => "zeroGradient",
            Self::FixedValue(_) => "fixedValue",
            Self::Calculated => "calculated",
        }
    }
}

impl<T> fmt::Display for BoundaryCondition<T>
where
    T: Copy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
