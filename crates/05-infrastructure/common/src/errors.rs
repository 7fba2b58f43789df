//! 错误类型定义

use thiserror::Error;

/// 装箱的通用错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 配置文档错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置文件读取失败: {source}")]
    FileReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("配置解析失败: {source}")]
    ParseError { source: BoxError },

    #[error("不支持的配置文件格式: {path}")]
    UnsupportedFormat { path: String },

    #[error("配置文档结构无效: {message}")]
    InvalidDocument { message: String },
}

impl ConfigError {
    /// 创建解析错误
    pub fn parse_error(source: impl Into<BoxError>) -> Self {
        Self::ParseError {
            source: source.into(),
        }
    }

    /// 创建文档结构错误
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}

/// Bean 容器错误类型
#[derive(Error, Debug)]
pub enum BeanError {
    #[error("Bean 配置错误: {message}")]
    Configuration { message: String },

    #[error("Bean 未定义: {name}")]
    UnknownBean { name: String },

    #[error("Bean 实例化失败: {type_name}, 原因: {message}")]
    Instantiation { type_name: String, message: String },

    #[error("字段不存在: {type_name}.{field}")]
    MissingField { type_name: String, field: String },

    #[error("字段赋值被拒绝: {type_name}.{field}, 原因: {message}")]
    Access {
        type_name: String,
        field: String,
        message: String,
    },

    #[error("方法不存在: {type_name}.{method}()")]
    NoSuchMethod { type_name: String, method: String },

    #[error("方法调用失败: {type_name}.{method}(), 原因: {source}")]
    Invocation {
        type_name: String,
        method: String,
        source: BoxError,
    },

    #[error("类型转换失败: 值 {value:?} 无法转换为 {target_type}, 原因: {message}")]
    Conversion {
        target_type: String,
        value: String,
        message: String,
    },

    #[error("检测到循环引用: {chain}")]
    CircularReference { chain: String },

    #[error("解析深度超过上限 {max_depth}: {chain}")]
    ResolutionDepthExceeded { max_depth: usize, chain: String },

    #[error("Bean 类型不匹配: {name} 不是 {expected}")]
    TypeMismatch { name: String, expected: String },
}

impl BeanError {
    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 创建 Bean 未定义错误
    pub fn unknown_bean(name: impl Into<String>) -> Self {
        Self::UnknownBean { name: name.into() }
    }

    /// 创建实例化错误
    pub fn instantiation(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Instantiation {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// 创建字段不存在错误
    pub fn missing_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// 创建字段赋值错误
    pub fn access(
        type_name: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Access {
            type_name: type_name.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// 创建方法不存在错误
    pub fn no_such_method(type_name: impl Into<String>, method: impl Into<String>) -> Self {
        Self::NoSuchMethod {
            type_name: type_name.into(),
            method: method.into(),
        }
    }

    /// 创建方法调用错误
    pub fn invocation(
        type_name: impl Into<String>,
        method: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Invocation {
            type_name: type_name.into(),
            method: method.into(),
            source: source.into(),
        }
    }

    /// 创建类型转换错误
    pub fn conversion(
        target_type: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            target_type: target_type.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// 创建循环引用错误，`chain` 为完整的解析链（首尾同名）
    pub fn circular_reference<S: AsRef<str>>(chain: &[S]) -> Self {
        Self::CircularReference {
            chain: join_chain(chain),
        }
    }

    /// 是否为加载期错误
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// 将解析链格式化为 `a -> b -> c`
pub fn join_chain<S: AsRef<str>>(chain: &[S]) -> String {
    chain
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("Bean 容器错误: {source}")]
    BeanError {
        #[from]
        source: BeanError,
    },

    #[error("容器启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type BeanResult<T> = Result<T, BeanError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
