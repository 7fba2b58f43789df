//! # Dependency Injection Abstractions
//!
//! Bean 容器抽象层，定义 Bean 定义模型以及定义注册、实例创建、值转换和
//! 依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`BeanDefinition`] - Bean 定义
//! - [`BeanDefinitionRegistry`] - 定义注册表接口
//! - [`BeanDefinitionReader`] - 定义加载器接口
//! - [`InstanceFactory`] - 实例工厂接口
//! - [`TypeConverter`] - 字面量类型转换器接口
//! - [`BeanFactory`] - 容器查询接口

pub mod container;
pub mod converter;
pub mod definition;
pub mod factory;
pub mod reader;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use converter::*;
pub use definition::*;
pub use factory::*;
pub use reader::*;
pub use registry::*;
pub use resolver::*;
