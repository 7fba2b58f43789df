//! Bean 容器抽象接口
//!
//! 提供按名称获取 Bean 的核心抽象

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use infrastructure_common::{BeanError, BeanInstance, BeanResult};
use std::any::Any;
use std::sync::Arc;

/// Bean 工厂 trait
///
/// 加载完成后容器只读共享，所有方法都可以从多个任务并发调用。
#[async_trait]
pub trait BeanFactory: Send + Sync {
    /// 按名称获取 Bean
    ///
    /// 单例返回同一个实例，原型每次返回新实例。
    async fn get_bean(&self, name: &str) -> BeanResult<BeanInstance>;

    /// 检查是否存在指定名称的定义
    fn contains_bean(&self, name: &str) -> bool;

    /// 指定 Bean 是否单例
    fn is_singleton(&self, name: &str) -> BeanResult<bool>;

    /// 指定 Bean 是否原型
    fn is_prototype(&self, name: &str) -> BeanResult<bool> {
        self.is_singleton(name).map(|singleton| !singleton)
    }

    /// 所有定义名称，按注册顺序
    fn bean_names(&self) -> Vec<String>;
}

/// 将实例转换为具体类型
pub fn downcast_bean<T>(name: &str, instance: BeanInstance) -> BeanResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    instance
        .downcast::<T>()
        .map_err(|_| BeanError::TypeMismatch {
            name: name.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })
}

/// 容器配置
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 启动时是否预先创建所有单例
    pub eager_singletons: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: 100,
            eager_singletons: false,
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone)]
pub struct ContainerStats {
    /// 容器标识
    pub container_id: String,
    /// 定义加载完成时间
    pub loaded_at: DateTime<Utc>,
    /// 已注册定义数量
    pub registered_definitions: usize,
    /// 单例定义数量
    pub singleton_definitions: usize,
    /// 原型定义数量
    pub prototype_definitions: usize,
    /// 已缓存的单例数量
    pub active_singletons: usize,
    /// 累计创建的实例数量
    pub created_instances: usize,
    /// 解析错误数量
    pub resolution_errors: usize,
}
