// crates/sgs_config/src/lib.rs

//! SGS Config Layer
//!
//! 配置层，提供 LES 属性字典、配置校验以及可重复读取的配置源。
//!
//! # 模块概览
//!
//! - [`les_properties`]: `LesProperties`（模型名、滤波宽度、模型系数）
//! - [`source`]: `ConfigSource` trait 及文件/内存实现
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: sgs_cli        ─> 读取并校验配置
//! Layer 4: sgs_physics    ─> 构造/重读模型时调用 ConfigSource::load
//! Layer 3: sgs_config     ─> LesProperties, ConfigSource (本层)
//! Layer 1: sgs_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod les_properties;
pub mod source;

// 重导出核心类型
pub use error::ConfigError;
pub use les_properties::{DeltaConfig, LesProperties, ModelCoeffs};
pub use source::{ConfigSource, FileConfigSource, StaticConfigSource};
