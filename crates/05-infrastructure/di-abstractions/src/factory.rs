//! 实例工厂抽象接口
//!
//! 根据 Bean 定义中解析出的类型创建未赋值的原始实例。

use crate::definition::BeanDefinition;
use infrastructure_common::{Bean, BeanResult, TypeInfo};
use std::fmt;
use std::sync::Arc;

/// 无参构造器
pub type BeanConstructor = Arc<dyn Fn() -> BeanResult<Box<dyn Bean>> + Send + Sync>;

/// 已注册类型的描述
#[derive(Clone)]
pub struct BeanTypeDescriptor {
    /// 类型信息
    pub type_info: TypeInfo,
    /// 构造器，`None` 表示类型不可构造
    pub constructor: Option<BeanConstructor>,
}

impl BeanTypeDescriptor {
    /// 是否可由容器构造
    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some()
    }
}

impl fmt::Debug for BeanTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanTypeDescriptor")
            .field("type_info", &self.type_info)
            .field("constructible", &self.is_constructible())
            .finish()
    }
}

/// 类型解析器
///
/// 将配置中书写的类型引用解析为已注册的类型。
pub trait TypeResolver: Send + Sync {
    /// 解析类型引用，未注册时返回 `None`
    fn resolve_type(&self, class_name: &str) -> Option<BeanTypeDescriptor>;
}

/// 实例工厂 trait
pub trait InstanceFactory: Send + Sync {
    /// 创建原始实例
    ///
    /// 类型不可构造、构造器返回错误或发生 panic 时返回
    /// [`infrastructure_common::BeanError::Instantiation`]。
    fn create_instance(&self, definition: &BeanDefinition) -> BeanResult<Box<dyn Bean>>;
}
