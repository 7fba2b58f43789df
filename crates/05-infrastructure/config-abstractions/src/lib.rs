//! # Configuration Abstractions
//!
//! Bean 配置文档的抽象层。配置文件的具体格式（TOML / JSON / YAML）由外部解析器
//! 负责，解析结果统一为通用的元素树，供定义加载器遍历。
//!
//! ## 核心接口
//!
//! - [`ConfigElement`] - 通用的属性/元素树节点
//! - [`DocumentProvider`] - 配置文档提供者接口
//! - [`DocumentFormat`] - 支持的文档格式

pub mod element;
pub mod provider;

pub use element::*;
pub use provider::*;
