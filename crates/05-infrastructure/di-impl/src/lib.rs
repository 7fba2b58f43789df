//! # Bean 容器具体实现
//!
//! 提供定义注册表、元素树加载器、类型注册表、类型转换器以及支持并发访问的
//! [`DefaultBeanContainer`]。
//!
//! ## 创建流程
//!
//! 加载器 → 注册表 → `get_bean()` → 实例工厂 → 属性填充（可能递归获取引用）
//! → 初始化方法 → 单例写入缓存 → 返回调用方

pub mod container;
pub mod converters;
pub mod initializer;
pub mod populator;
pub mod reader;
pub mod registry;
pub mod type_registry;

pub use container::DefaultBeanContainer;
pub use converters::{ConverterRegistry, ParseConverter, StringConverter};
pub use initializer::LifecycleInitializer;
pub use populator::PropertyPopulator;
pub use reader::{ElementDefinitionReader, DEFAULT_IGNORED_ELEMENTS};
pub use registry::DefaultBeanDefinitionRegistry;
pub use type_registry::BeanTypeRegistry;
