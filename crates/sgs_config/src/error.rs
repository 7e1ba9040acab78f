// crates/sgs_config/src/error.rs

//! 配置层错误类型

use sgs_foundation::SgsError;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 无效值
    #[error("无效值 '{key}': {value} - {reason}")]
    InvalidValue {
        /// 配置键
        key: String,
        /// 配置值
        value: String,
        /// 原因
        reason: String,
    },

    /// 缺失配置
    #[error("缺失配置: {0}")]
    Missing(String),
}

impl ConfigError {
    /// 无效值
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// 转换到 Foundation 层错误
impl From<ConfigError> for SgsError {
    fn from(err: ConfigError) -> Self {
        SgsError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_value("coeffs.widthCoeff", -1.0, "必须为正");
        assert!(err.to_string().contains("widthCoeff"));
    }

    #[test]
    fn test_into_sgs_error() {
        let err: SgsError = ConfigError::Missing("coeffs".into()).into();
        assert!(matches!(err, SgsError::Config { .. }));
    }
}
