//! 配置文档提供者实现

use crate::element_tree::{document_to_element, toml_to_json};
use config_abstractions::{ConfigElement, DocumentFormat, DocumentProvider};
use infrastructure_common::{ConfigError, ConfigResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 文档来源
#[derive(Debug, Clone)]
enum DocumentSource {
    /// 文件
    File(PathBuf),
    /// 内存中的文档内容
    Inline(String),
}

impl DocumentSource {
    fn read(&self) -> ConfigResult<String> {
        match self {
            Self::File(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                debug!("读取配置文件: {}", path.display());
                Ok(std::fs::read_to_string(path)?)
            }
            Self::Inline(content) => Ok(content.clone()),
        }
    }

    fn describe(&self) -> &str {
        match self {
            Self::File(path) => path.to_str().unwrap_or("unknown"),
            Self::Inline(_) => "<inline>",
        }
    }
}

/// TOML 文档提供者
#[derive(Debug, Clone)]
pub struct TomlDocumentProvider {
    source: DocumentSource,
}

impl TomlDocumentProvider {
    /// 从文件创建
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: DocumentSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// 从文档内容创建
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            source: DocumentSource::Inline(content.into()),
        }
    }
}

impl DocumentProvider for TomlDocumentProvider {
    fn load(&self) -> Result<ConfigElement, ConfigError> {
        let content = self.source.read()?;
        let value: toml::Value = toml::from_str(&content).map_err(ConfigError::parse_error)?;
        let root = document_to_element(&toml_to_json(&value))?;
        debug!("TOML 文档解析完成: {}", self.source.describe());
        Ok(root)
    }

    fn name(&self) -> &str {
        "TomlDocumentProvider"
    }

    fn source(&self) -> &str {
        self.source.describe()
    }
}

/// JSON 文档提供者
#[derive(Debug, Clone)]
pub struct JsonDocumentProvider {
    source: DocumentSource,
}

impl JsonDocumentProvider {
    /// 从文件创建
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: DocumentSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// 从文档内容创建
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            source: DocumentSource::Inline(content.into()),
        }
    }
}

impl DocumentProvider for JsonDocumentProvider {
    fn load(&self) -> Result<ConfigElement, ConfigError> {
        let content = self.source.read()?;
        let value: Value = serde_json::from_str(&content).map_err(ConfigError::parse_error)?;
        let root = document_to_element(&value)?;
        debug!("JSON 文档解析完成: {}", self.source.describe());
        Ok(root)
    }

    fn name(&self) -> &str {
        "JsonDocumentProvider"
    }

    fn source(&self) -> &str {
        self.source.describe()
    }
}

/// YAML 文档提供者
#[derive(Debug, Clone)]
pub struct YamlDocumentProvider {
    source: DocumentSource,
}

impl YamlDocumentProvider {
    /// 从文件创建
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: DocumentSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// 从文档内容创建
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            source: DocumentSource::Inline(content.into()),
        }
    }
}

impl DocumentProvider for YamlDocumentProvider {
    fn load(&self) -> Result<ConfigElement, ConfigError> {
        let content = self.source.read()?;
        let value: Value = serde_yaml::from_str(&content).map_err(ConfigError::parse_error)?;
        let root = document_to_element(&value)?;
        debug!("YAML 文档解析完成: {}", self.source.describe());
        Ok(root)
    }

    fn name(&self) -> &str {
        "YamlDocumentProvider"
    }

    fn source(&self) -> &str {
        self.source.describe()
    }
}

/// 根据文件扩展名选择文档提供者
pub fn provider_for_path<P: AsRef<Path>>(path: P) -> ConfigResult<Box<dyn DocumentProvider>> {
    let path = path.as_ref();
    let provider: Box<dyn DocumentProvider> = match DocumentFormat::from_path(path)? {
        DocumentFormat::Toml => Box::new(TomlDocumentProvider::new(path)),
        DocumentFormat::Json => Box::new(JsonDocumentProvider::new(path)),
        DocumentFormat::Yaml => Box::new(YamlDocumentProvider::new(path)),
    };
    Ok(provider)
}
