//! # Infrastructure Common
//!
//! 这个 crate 提供了 Lorn IoC 容器各层共享的 traits、错误类型和元数据。
//!
//! ## 核心组件
//!
//! - [`Bean`] - 容器可管理对象的访问器表（字段赋值、方法调用）
//! - [`BeanType`] - 可注册类型的静态信息（类型信息、无参构造器）
//! - [`ResolvedValue`] / [`FromResolvedValue`] - 属性值到字段类型的转换
//! - [`BeanScope`] / [`BeanLifecycleState`] - 作用域与生命周期
//! - [`BeanError`] - 容器错误类型
//!
//! ## 设计原则
//!
//! - 以生成的访问器表代替运行时反射
//! - 所有失败都以 `Result` 返回，不吞掉任何错误
//! - 不使用进程级全局状态，多个容器可以并存

pub mod bean;
pub mod errors;
pub mod lifecycle;
pub mod metadata;
pub mod value;

pub use bean::*;
pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
pub use value::*;
