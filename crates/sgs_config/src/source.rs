// crates/sgs_config/src/source.rs

//! 配置源
//!
//! 模型在构造与 `read()` 时通过 [`ConfigSource::load`] 获取最新配置。
//! 加载失败由调用方决定是否继续使用旧配置。

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ConfigError;
use crate::les_properties::LesProperties;

/// 可重复读取的配置源
pub trait ConfigSource: Send + Sync {
    /// 读取并校验当前配置
    fn load(&self) -> Result<LesProperties, ConfigError>;

    /// 配置源描述（用于日志）
    fn describe(&self) -> String;
}

/// JSON 文件配置源，每次 `load` 重新读取文件
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    /// 创建文件配置源
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn load(&self) -> Result<LesProperties, ConfigError> {
        LesProperties::from_file(&self.path)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// 内存配置源
///
/// 克隆共享同一份配置，可通过 [`StaticConfigSource::update`] 修改。
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    inner: Arc<RwLock<LesProperties>>,
}

impl StaticConfigSource {
    /// 创建内存配置源
    pub fn new(props: LesProperties) -> Self {
        Self {
            inner: Arc::new(RwLock::new(props)),
        }
    }

    /// 替换配置
    pub fn update(&self, props: LesProperties) {
        *self.inner.write() = props;
    }

    /// 当前配置快照
    pub fn snapshot(&self) -> LesProperties {
        self.inner.read().clone()
    }
}

impl ConfigSource for StaticConfigSource {
    fn load(&self) -> Result<LesProperties, ConfigError> {
        let props = self.snapshot();
        props.validate()?;
        Ok(props)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
