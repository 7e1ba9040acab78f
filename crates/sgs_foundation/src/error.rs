// crates/sgs_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `SgsError` 枚举和 `SgsResult` 类型别名。上层 crate 的错误
//! （`MeshError`、`ConfigError`）在各自 crate 中实现到 `SgsError` 的转换。
//!
//! # 示例
//!
//! ```
//! use sgs_foundation::error::{SgsError, SgsResult};
//!
//! fn lookup_k() -> SgsResult<()> {
//!     Err(SgsError::missing_field("k"))
//! }
//! assert!(lookup_k().is_err());
//! ```

use thiserror::Error;

/// 统一结果类型
pub type SgsResult<T> = Result<T, SgsError>;

/// SGS 工作区错误类型
#[derive(Error, Debug)]
pub enum SgsError {
    /// 必需的初始场不存在
    #[error("缺少必需的场: {name}")]
    MissingField {
        /// 场名称
        name: String,
    },

    /// 未知的滤波器类型
    #[error("未知的滤波器类型 '{name}' (可用: {available:?})")]
    UnknownFilter {
        /// 请求的类型
        name: String,
        /// 已注册的类型
        available: Vec<String>,
    },

    /// 未知的 SGS 模型
    #[error("未知的 SGS 模型 '{name}' (可用: {available:?})")]
    UnknownModel {
        /// 请求的模型
        name: String,
        /// 已注册的模型
        available: Vec<String>,
    },

    /// 未知的滤波宽度类型
    #[error("未知的滤波宽度类型 '{name}' (可用: {available:?})")]
    UnknownDelta {
        /// 请求的类型
        name: String,
        /// 已注册的类型
        available: Vec<String>,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 无效网格
    #[error("无效的网格: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    /// 无效输入
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl SgsError {
    /// 缺少场
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField { name: name.into() }
    }

    /// 未知滤波器
    pub fn unknown_filter(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownFilter {
            name: name.into(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 未知模型
    pub fn unknown_model(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownModel {
            name: name.into(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 未知滤波宽度
    pub fn unknown_delta(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownDelta {
            name: name.into(),
            available: available.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 是否为构造期的致命错误（缺场、未知类型）
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::UnknownFilter { .. }
                | Self::UnknownModel { .. }
                | Self::UnknownDelta { .. }
        )
    }
}

/// 条件检查宏：失败时返回 `SgsError::InvalidInput`
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::error::SgsError::invalid_input(format!($($arg)*)));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SgsError::size_mismatch("grad_u", 8, 7);
        let msg = err.to_string();
        assert!(msg.contains("grad_u"));
        assert!(msg.contains('8'));
    }

    #[test]
    fn test_unknown_filter_lists_available() {
        let err = SgsError::unknown_filter("gauss", &["simple", "laplace"]);
        let msg = err.to_string();
        assert!(msg.contains("gauss"));
        assert!(msg.contains("laplace"));
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(x: f64) -> SgsResult<f64> {
            ensure!(x > 0.0, "x 必须为正: {}", x);
            Ok(x)
        }
        assert!(check(1.0).is_ok());
        assert!(matches!(check(-1.0), Err(SgsError::InvalidInput { .. })));
    }
}
