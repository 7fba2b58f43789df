//! # 基础设施组合层
//!
//! 这个 crate 负责把配置文档、类型注册表和转换器组合成一个可用的 Bean 容器。
//!
//! ## 主要功能
//!
//! - **容器构建器**: 使用构建者模式组装容器
//! - **多格式文档**: TOML、JSON、YAML 文档按添加顺序加载
//! - **日志初始化**: 可选的 `tracing` 订阅器配置
//!
//! ## 基本使用
//!
//! 只依赖本 crate 时，通过 `crate` 参数让派生代码使用重新导出的公共类型：
//!
//! ```rust,ignore
//! use infrastructure_composition::prelude::*;
//!
//! #[derive(Default, Bean)]
//! #[bean(crate = "infrastructure_composition::common")]
//! pub struct DataSource {
//!     url: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let container = BeanContainerBuilder::new()
//!         .add_config_toml("config/beans.toml")?
//!         .register_type_alias::<DataSource>("DataSource")
//!         .build()
//!         .await?;
//!
//!     let data_source = container.get_bean_as::<DataSource>("DataSource").await?;
//!     println!("数据源: {}", data_source.url);
//!     Ok(())
//! }
//! ```

pub mod builder;

// 重新导出主要类型
pub use builder::{BeanContainerBuilder, LoggingConfig};
pub use config_impl::{JsonDocumentProvider, TomlDocumentProvider, YamlDocumentProvider};
pub use di_impl::DefaultBeanContainer;

/// 公共类型，供 `#[bean(crate = "infrastructure_composition::common")]` 使用
pub use infrastructure_common as common;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;

/// 常用类型
pub mod prelude {
    pub use crate::builder::{BeanContainerBuilder, LoggingConfig};
    pub use component_macros::Bean;
    pub use di_abstractions::{downcast_bean, BeanFactory, ContainerConfig, ContainerStats};
    pub use di_impl::DefaultBeanContainer;
    pub use infrastructure_common::{BeanError, BeanScope, BeanType, InfrastructureError};
}
