//! Bean 定义注册表实现

use di_abstractions::{BeanDefinition, BeanDefinitionRegistry};
use infrastructure_common::{BeanError, BeanResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// 默认 Bean 定义注册表
///
/// 保留注册顺序，供预实例化和名称列表使用。
#[derive(Debug, Default, Clone)]
pub struct DefaultBeanDefinitionRegistry {
    definitions: HashMap<String, Arc<BeanDefinition>>,
    order: Vec<String>,
}

impl DefaultBeanDefinitionRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 按注册顺序遍历定义
    pub fn iter(&self) -> impl Iterator<Item = &Arc<BeanDefinition>> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.definitions.get(name))
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl BeanDefinitionRegistry for DefaultBeanDefinitionRegistry {
    fn register_definition(&mut self, definition: BeanDefinition) -> BeanResult<()> {
        let name = definition.name().to_string();
        if let Some(existing) = self.definitions.get(&name) {
            return Err(BeanError::configuration(format!(
                "Bean 名称重复: '{}' 已由 {} 定义",
                name,
                existing.class_name()
            )));
        }

        info!(
            "注册 Bean 定义: {} ({}, {})",
            name,
            definition.type_info().path,
            definition.scope()
        );
        self.order.push(name.clone());
        self.definitions.insert(name, Arc::new(definition));
        Ok(())
    }

    fn get_definition(&self, name: &str) -> Option<Arc<BeanDefinition>> {
        self.definitions.get(name).cloned()
    }

    fn contains_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    fn definition_names(&self) -> Vec<String> {
        self.order.clone()
    }

    fn definition_count(&self) -> usize {
        self.order.len()
    }
}
