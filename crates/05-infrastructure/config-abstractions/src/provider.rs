//! 配置文档提供者抽象接口

use crate::element::ConfigElement;
use infrastructure_common::ConfigError;
use std::path::Path;

/// 配置文档提供者 trait
///
/// 定义从不同数据源读取 Bean 配置文档的统一接口。文档只在启动时读取一次。
pub trait DocumentProvider: Send + Sync {
    /// 读取并解析文档，返回根元素
    fn load(&self) -> Result<ConfigElement, ConfigError>;

    /// 获取提供者名称
    fn name(&self) -> &str;

    /// 文档来源描述（文件路径或 `<inline>`）
    fn source(&self) -> &str {
        "<inline>"
    }
}

/// 支持的文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// TOML
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// 根据文件扩展名判断格式
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}
