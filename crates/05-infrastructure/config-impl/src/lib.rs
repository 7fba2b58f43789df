//! # Configuration Implementation
//!
//! Bean 配置文档的具体解析实现，把各种格式的文档统一转换为
//! [`ConfigElement`](config_abstractions::ConfigElement) 元素树。
//!
//! ## 主要组件
//!
//! - [`TomlDocumentProvider`] - TOML 文档提供者
//! - [`JsonDocumentProvider`] - JSON 文档提供者
//! - [`YamlDocumentProvider`] - YAML 文档提供者
//! - [`value_to_element`] - JSON 值到元素树的转换规则

pub mod element_tree;
pub mod providers;

pub use element_tree::*;
pub use providers::*;
