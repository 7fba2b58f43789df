//! Bean 定义注册表抽象接口

use crate::definition::BeanDefinition;
use infrastructure_common::{BeanError, BeanResult};
use std::collections::HashSet;
use std::sync::Arc;

/// Bean 定义注册表 trait
///
/// 加载阶段通过 `&mut self` 填充，之后只读。名称在注册表内唯一。
pub trait BeanDefinitionRegistry: Send + Sync {
    /// 注册定义，名称冲突时返回 [`BeanError::Configuration`]
    fn register_definition(&mut self, definition: BeanDefinition) -> BeanResult<()>;

    /// 获取定义
    fn get_definition(&self, name: &str) -> Option<Arc<BeanDefinition>>;

    /// 检查定义是否存在
    fn contains_definition(&self, name: &str) -> bool {
        self.get_definition(name).is_some()
    }

    /// 按注册顺序返回所有定义名称
    fn definition_names(&self) -> Vec<String>;

    /// 定义数量
    fn definition_count(&self) -> usize {
        self.definition_names().len()
    }
}

/// 循环引用检测器
///
/// 基于定义之间的静态引用关系工作，不创建任何实例。
pub trait CircularReferenceDetector: Send + Sync {
    /// 检测注册表中的引用环，发现时返回 [`BeanError::CircularReference`]
    fn detect_cycles(&self, registry: &dyn BeanDefinitionRegistry) -> BeanResult<()>;

    /// 从 `start` 出发沿引用能否到达 `targets` 中的任一名称
    fn reaches_any(
        &self,
        registry: &dyn BeanDefinitionRegistry,
        start: &str,
        targets: &[String],
    ) -> bool;
}

/// 默认循环引用检测器
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCircularReferenceDetector;

impl CircularReferenceDetector for DefaultCircularReferenceDetector {
    fn detect_cycles(&self, registry: &dyn BeanDefinitionRegistry) -> BeanResult<()> {
        // 使用深度优先搜索检测引用环
        let mut visited = HashSet::new();
        let mut path = Vec::new();

        for name in registry.definition_names() {
            if !visited.contains(&name) {
                self.dfs_check(&name, registry, &mut visited, &mut path)?;
            }
        }

        Ok(())
    }

    fn reaches_any(
        &self,
        registry: &dyn BeanDefinitionRegistry,
        start: &str,
        targets: &[String],
    ) -> bool {
        if targets.is_empty() {
            return false;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![start.to_string()];

        while let Some(current) = stack.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let Some(definition) = registry.get_definition(&current) else {
                continue;
            };
            for reference in definition.references() {
                if targets.iter().any(|target| target == reference) {
                    return true;
                }
                if !visited.contains(reference) {
                    stack.push(reference.to_string());
                }
            }
        }

        false
    }
}

impl DefaultCircularReferenceDetector {
    fn dfs_check(
        &self,
        current: &str,
        registry: &dyn BeanDefinitionRegistry,
        visited: &mut HashSet<String>,
        path: &mut Vec<String>,
    ) -> BeanResult<()> {
        if let Some(start) = path.iter().position(|name| name == current) {
            // 检测到引用环
            let mut chain = path[start..].to_vec();
            chain.push(current.to_string());
            return Err(BeanError::circular_reference(&chain));
        }

        if visited.contains(current) {
            return Ok(());
        }

        path.push(current.to_string());

        if let Some(definition) = registry.get_definition(current) {
            for reference in definition.references() {
                self.dfs_check(reference, registry, visited, path)?;
            }
        }

        path.pop();
        visited.insert(current.to_string());

        Ok(())
    }
}
