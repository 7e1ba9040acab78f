// crates/sgs_mesh/src/error.rs
//! 网格处理错误类型
//!
//! 包含网格拓扑、几何退化、生成参数等错误定义。
//! 所有错误可转换为 `sgs_foundation::SgsError` 向上传播。

use sgs_foundation::SgsError;
use thiserror::Error;

/// 网格模块结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 拓扑错误
    #[error("拓扑错误: {operation} 失败, {details}")]
    InvalidTopology {
        /// 出错的操作
        operation: &'static str,
        /// 错误详情
        details: String,
    },

    /// 几何退化
    #[error("几何退化: {entity} {index}, {quantity} = {value:.3e}")]
    Degenerate {
        /// 元素类别（单元/面）
        entity: &'static str,
        /// 元素索引
        index: usize,
        /// 退化的几何量
        quantity: &'static str,
        /// 实际值
        value: f64,
    },

    /// 生成参数无效
    #[error("网格生成参数无效: {0}")]
    InvalidDimensions(String),

    /// 网格未闭合
    #[error("单元 {cell} 未闭合: |ΣS_f| / ΣS_f = {ratio:.3e}")]
    OpenCell {
        /// 单元索引
        cell: usize,
        /// 残差比
        ratio: f64,
    },
}

/// 转换到 Foundation 层错误
impl From<MeshError> for SgsError {
    fn from(err: MeshError) -> Self {
        SgsError::invalid_mesh(err.to_string())
    }
}

/// 便捷构造函数
impl MeshError {
    /// 拓扑错误
    pub fn invalid_topology(operation: &'static str, details: impl Into<String>) -> Self {
        Self::InvalidTopology {
            operation,
            details: details.into(),
        }
    }

    /// 几何退化
    pub fn degenerate(entity: &'static str, index: usize, quantity: &'static str, value: f64) -> Self {
        Self::Degenerate {
            entity,
            index,
            quantity,
            value,
        }
    }
}
