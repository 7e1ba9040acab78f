// crates/sgs_config/src/les_properties.rs

//! LesProperties - LES 模型配置字典
//!
//! JSON 键采用 camelCase，与 CFD 案例字典的写法保持一致：
//!
//! ```json
//! {
//!   "model": "dynLocalAverageSmagorinsky",
//!   "printCoeffs": true,
//!   "delta": { "type": "cubeRootVol", "deltaCoeff": 1.0 },
//!   "coeffs": { "filter": "simple", "ce": 1.048 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// LES 属性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LesProperties {
    /// SGS 模型名称
    #[serde(default = "default_model")]
    pub model: String,

    /// 构造时是否打印模型系数
    #[serde(default = "default_print_coeffs")]
    pub print_coeffs: bool,

    /// 滤波宽度配置
    #[serde(default)]
    pub delta: DeltaConfig,

    /// 模型系数（含测试滤波器配置）
    #[serde(default)]
    pub coeffs: ModelCoeffs,
}

fn default_model() -> String {
    "dynLocalAverageSmagorinsky".to_string()
}
fn default_print_coeffs() -> bool {
    true
}

/// 滤波宽度配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaConfig {
    /// 宽度类型（cubeRootVol / maxDeltaxyz）
    #[serde(rename = "type", default = "default_delta_type")]
    pub kind: String,

    /// 宽度系数
    #[serde(default = "default_delta_coeff")]
    pub delta_coeff: f64,
}

fn default_delta_type() -> String {
    "cubeRootVol".to_string()
}
fn default_delta_coeff() -> f64 {
    1.0
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            kind: default_delta_type(),
            delta_coeff: default_delta_coeff(),
        }
    }
}

/// 模型系数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCoeffs {
    /// 测试滤波器类型（simple / laplace）
    #[serde(default = "default_filter")]
    pub filter: String,

    /// 耗散系数 c_e（ε = c_e·k^{3/2}/Δ）
    #[serde(default = "default_ce")]
    pub ce: f64,

    /// laplace 滤波器宽度系数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_coeff: Option<f64>,
}

fn default_filter() -> String {
    "simple".to_string()
}
fn default_ce() -> f64 {
    1.048
}

impl Default for ModelCoeffs {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            ce: default_ce(),
            width_coeff: None,
        }
    }
}

impl Default for LesProperties {
    fn default() -> Self {
        Self {
            model: default_model(),
            print_coeffs: default_print_coeffs(),
            delta: DeltaConfig::default(),
            coeffs: ModelCoeffs::default(),
        }
    }
}

impl LesProperties {
    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let props: LesProperties =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        props.validate()?;
        Ok(props)
    }

    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// 序列化为格式化 JSON
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 使用指定滤波器类型
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.coeffs.filter = filter.into();
        self
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Missing("model".to_string()));
        }

        if !(self.delta.delta_coeff > 0.0) || !self.delta.delta_coeff.is_finite() {
            return Err(ConfigError::invalid_value(
                "delta.deltaCoeff",
                self.delta.delta_coeff,
                "必须为正的有限值",
            ));
        }

        if !(self.coeffs.ce > 0.0) || !self.coeffs.ce.is_finite() {
            return Err(ConfigError::invalid_value(
                "coeffs.ce",
                self.coeffs.ce,
                "必须为正的有限值",
            ));
        }

        if let Some(w) = self.coeffs.width_coeff {
            if !(w > 0.0) || !w.is_finite() {
                return Err(ConfigError::invalid_value(
                    "coeffs.widthCoeff",
                    w,
                    "必须为正的有限值",
                ));
            }
        }

        Ok(())
    }
}
