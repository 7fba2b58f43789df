//! Bean 类型注册表
//!
//! 记录容器可以实例化的类型。配置中的 `class` 以完整类型路径
//! （`std::any::type_name` 的结果）或注册的别名引用类型。

use di_abstractions::{BeanConstructor, BeanDefinition, BeanTypeDescriptor, InstanceFactory, TypeResolver};
use infrastructure_common::{Bean, BeanError, BeanResult, BeanType, BoxError, TypeInfo};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Bean 类型注册表
#[derive(Debug, Default, Clone)]
pub struct BeanTypeRegistry {
    types: HashMap<String, BeanTypeDescriptor>,
    aliases: HashMap<String, String>,
}

impl BeanTypeRegistry {
    /// 创建空的类型注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册类型，使用类型自身声明的无参构造器
    pub fn register<T: BeanType>(&mut self) -> &mut Self {
        let constructor = T::constructor().map(|construct| -> BeanConstructor {
            Arc::new(move || Ok(Box::new(construct()) as Box<dyn Bean>))
        });
        self.insert(T::type_info(), constructor)
    }

    /// 注册类型并使用自定义构造闭包
    ///
    /// 闭包返回的错误在实例化时转换为 [`BeanError::Instantiation`]。
    pub fn register_constructor<T, F, E>(&mut self, construct: F) -> &mut Self
    where
        T: BeanType,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        let type_info = T::type_info();
        let type_name = type_info.path.clone();
        let constructor: BeanConstructor = Arc::new(move || {
            construct()
                .map(|bean| Box::new(bean) as Box<dyn Bean>)
                .map_err(|err| BeanError::instantiation(type_name.as_str(), err.into().to_string()))
        });
        self.insert(type_info, Some(constructor))
    }

    /// 为已注册或将要注册的类型添加别名
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        class_name: impl Into<String>,
    ) -> &mut Self {
        let alias = alias.into();
        let class_name = class_name.into();
        debug!("注册类型别名: {} -> {}", alias, class_name);
        self.aliases.insert(alias, class_name);
        self
    }

    /// 检查类型引用是否可解析
    pub fn contains(&self, class_name: &str) -> bool {
        self.lookup(class_name).is_some()
    }

    /// 已注册的类型数量
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn insert(&mut self, type_info: TypeInfo, constructor: Option<BeanConstructor>) -> &mut Self {
        debug!(
            "注册 Bean 类型: {} (可构造: {})",
            type_info.path,
            constructor.is_some()
        );
        self.types.insert(
            type_info.path.clone(),
            BeanTypeDescriptor {
                type_info,
                constructor,
            },
        );
        self
    }

    fn lookup(&self, class_name: &str) -> Option<&BeanTypeDescriptor> {
        let class_name = class_name.trim();
        self.types.get(class_name).or_else(|| {
            self.aliases
                .get(class_name)
                .and_then(|target| self.types.get(target))
        })
    }
}

impl TypeResolver for BeanTypeRegistry {
    fn resolve_type(&self, class_name: &str) -> Option<BeanTypeDescriptor> {
        self.lookup(class_name).cloned()
    }
}

impl InstanceFactory for BeanTypeRegistry {
    fn create_instance(&self, definition: &BeanDefinition) -> BeanResult<Box<dyn Bean>> {
        let type_name = definition.type_info().path.as_str();
        let descriptor = self
            .types
            .get(type_name)
            .ok_or_else(|| BeanError::instantiation(type_name, "类型未注册"))?;
        let constructor = descriptor
            .constructor
            .as_ref()
            .ok_or_else(|| BeanError::instantiation(type_name, "类型没有可用的无参构造器"))?;

        match catch_unwind(AssertUnwindSafe(|| constructor())) {
            Ok(result) => result,
            Err(payload) => Err(BeanError::instantiation(
                type_name,
                format!("构造器发生 panic: {}", panic_message(payload.as_ref())),
            )),
        }
    }
}

/// 提取 panic 信息
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知 panic".to_string()
    }
}
