//! Bean 容器实现
//!
//! 单例缓存使用 `DashMap`，每个名称最多插入一次。正在创建的单例记录在
//! 创建表中：创建者持有 [`CreationGuard`]，其他任务等待守卫释放后重新检查缓存。

use crate::converters::ConverterRegistry;
use crate::initializer::LifecycleInitializer;
use crate::populator::PropertyPopulator;
use crate::reader::ElementDefinitionReader;
use crate::registry::DefaultBeanDefinitionRegistry;
use crate::type_registry::BeanTypeRegistry;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use config_abstractions::ConfigElement;
use dashmap::DashMap;
use di_abstractions::{
    downcast_bean, BeanDefinition, BeanDefinitionReader, BeanDefinitionRegistry, BeanFactory,
    CircularReferenceDetector, ContainerConfig, ContainerStats, ConversionService,
    DefaultCircularReferenceDetector, InstanceFactory, PropertyValue, ResolveContext,
    ResolveOptions,
};
use futures::future::{BoxFuture, FutureExt};
use infrastructure_common::{
    Bean, BeanError, BeanInstance, BeanLifecycleState, BeanResult, ResolvedValue,
};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

type CreationTable = Mutex<HashMap<String, watch::Receiver<()>>>;

/// 单例创建守卫
///
/// 释放时先移除创建表中的记录，再关闭通知通道，唤醒所有等待者。
struct CreationGuard<'a> {
    table: &'a CreationTable,
    name: String,
    _done: watch::Sender<()>,
}

impl Drop for CreationGuard<'_> {
    fn drop(&mut self) {
        self.table.lock().remove(&self.name);
    }
}

/// 单例获取结果
enum SingletonClaim<'a> {
    /// 已缓存
    Cached(BeanInstance),
    /// 由当前调用负责创建
    Owner(CreationGuard<'a>),
    /// 其他任务正在创建
    Wait(watch::Receiver<()>),
}

/// 默认 Bean 容器
pub struct DefaultBeanContainer {
    id: Uuid,
    config: ContainerConfig,
    registry: DefaultBeanDefinitionRegistry,
    types: BeanTypeRegistry,
    populator: PropertyPopulator,
    initializer: LifecycleInitializer,
    detector: DefaultCircularReferenceDetector,
    singletons: DashMap<String, BeanInstance>,
    in_creation: CreationTable,
    created_instances: AtomicUsize,
    resolution_errors: AtomicUsize,
    loaded_at: DateTime<Utc>,
}

impl DefaultBeanContainer {
    /// 使用已加载的定义创建容器
    pub fn new(
        registry: DefaultBeanDefinitionRegistry,
        types: BeanTypeRegistry,
        converters: ConverterRegistry,
        config: ContainerConfig,
    ) -> Self {
        let container = Self {
            id: Uuid::new_v4(),
            config,
            registry,
            types,
            populator: PropertyPopulator::new(converters),
            initializer: LifecycleInitializer,
            detector: DefaultCircularReferenceDetector,
            singletons: DashMap::new(),
            in_creation: Mutex::new(HashMap::new()),
            created_instances: AtomicUsize::new(0),
            resolution_errors: AtomicUsize::new(0),
            loaded_at: Utc::now(),
        };
        info!(
            "Bean 容器已创建: {} ({} 个定义, {} 个类型)",
            container.id,
            container.registry.definition_count(),
            container.types.len()
        );
        container
    }

    /// 从元素树加载定义并创建容器
    pub fn from_document(
        root: &ConfigElement,
        types: BeanTypeRegistry,
        converters: ConverterRegistry,
        config: ContainerConfig,
    ) -> BeanResult<Self> {
        let mut registry = DefaultBeanDefinitionRegistry::new();
        ElementDefinitionReader::new(&mut registry, &types).load_definitions(root)?;
        Ok(Self::new(registry, types, converters, config))
    }

    /// 使用内置转换器和默认配置从元素树创建容器
    pub fn load(root: &ConfigElement, types: BeanTypeRegistry) -> BeanResult<Self> {
        Self::from_document(
            root,
            types,
            ConverterRegistry::new(),
            ContainerConfig::default(),
        )
    }

    /// 容器标识
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 获取定义
    pub fn definition(&self, name: &str) -> Option<Arc<BeanDefinition>> {
        self.registry.get_definition(name)
    }

    /// 按名称获取指定类型的 Bean
    pub async fn get_bean_as<T>(&self, name: &str) -> BeanResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let instance = self.get_bean(name).await?;
        downcast_bean(name, instance)
    }

    /// 统计信息
    pub fn stats(&self) -> ContainerStats {
        let singleton_definitions = self
            .registry
            .iter()
            .filter(|definition| definition.is_singleton())
            .count();
        let registered_definitions = self.registry.definition_count();

        ContainerStats {
            container_id: self.id.to_string(),
            loaded_at: self.loaded_at,
            registered_definitions,
            singleton_definitions,
            prototype_definitions: registered_definitions - singleton_definitions,
            active_singletons: self.singletons.len(),
            created_instances: self.created_instances.load(Ordering::Relaxed),
            resolution_errors: self.resolution_errors.load(Ordering::Relaxed),
        }
    }

    /// 静态检查定义
    ///
    /// 报告未定义的引用、未注册的字面量类型和定义之间的引用环，不创建任何实例。
    pub fn validate(&self) -> Result<(), Vec<BeanError>> {
        info!("验证容器定义: {}", self.id);
        let mut errors = Vec::new();

        for definition in self.registry.iter() {
            for property in definition.properties() {
                match &property.value {
                    PropertyValue::Reference(reference) => {
                        if !self.registry.contains_definition(&reference.bean_name) {
                            errors.push(BeanError::configuration(format!(
                                "Bean '{}' 的属性 '{}' 引用了未定义的 Bean '{}'",
                                definition.name(),
                                property.name,
                                reference.bean_name
                            )));
                        }
                    }
                    PropertyValue::Literal(literal) => {
                        if let Some(target_type) = &literal.target_type {
                            if !self.populator.converters().can_convert(target_type) {
                                errors.push(BeanError::conversion(
                                    target_type.as_str(),
                                    literal.value.as_str(),
                                    "未注册该类型的转换器",
                                ));
                            }
                        }
                    }
                }
            }
        }

        if let Err(err) = self.detector.detect_cycles(&self.registry) {
            errors.push(err);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            warn!("容器定义验证失败: {} 个问题", errors.len());
            Err(errors)
        }
    }

    /// 按注册顺序创建所有单例，返回创建的数量
    pub async fn preinstantiate_singletons(&self) -> BeanResult<usize> {
        let mut count = 0;
        for definition in self.registry.iter() {
            if definition.is_singleton() {
                self.get_bean(definition.name()).await?;
                count += 1;
            }
        }
        info!("预实例化单例完成: {} 个", count);
        Ok(count)
    }

    fn cached_singleton(&self, name: &str) -> Option<BeanInstance> {
        self.singletons
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    fn claim_singleton(&self, name: &str) -> SingletonClaim<'_> {
        let mut table = self.in_creation.lock();
        if let Some(receiver) = table.get(name) {
            return SingletonClaim::Wait(receiver.clone());
        }
        // 创建者在释放守卫前写入缓存，因此持锁时再检查一次
        if let Some(instance) = self.cached_singleton(name) {
            return SingletonClaim::Cached(instance);
        }
        let (sender, receiver) = watch::channel(());
        table.insert(name.to_string(), receiver);
        SingletonClaim::Owner(CreationGuard {
            table: &self.in_creation,
            name: name.to_string(),
            _done: sender,
        })
    }

    fn resolve<'a>(
        &'a self,
        name: &'a str,
        context: &'a mut ResolveContext,
    ) -> BoxFuture<'a, BeanResult<BeanInstance>> {
        async move {
            if let Some(instance) = self.cached_singleton(name) {
                return Ok(instance);
            }

            let definition = self
                .registry
                .get_definition(name)
                .ok_or_else(|| BeanError::unknown_bean(name))?;

            context.push_name(name)?;
            debug!("解析 Bean: {} (深度 {})", name, context.depth());
            let result = if definition.is_singleton() {
                self.resolve_singleton(&definition, context).await
            } else {
                self.create_bean(&definition, context).await
            };
            context.pop_name();
            result
        }
        .boxed()
    }

    async fn resolve_singleton(
        &self,
        definition: &BeanDefinition,
        context: &mut ResolveContext,
    ) -> BeanResult<BeanInstance> {
        let name = definition.name();
        loop {
            match self.claim_singleton(name) {
                SingletonClaim::Cached(instance) => return Ok(instance),
                SingletonClaim::Owner(guard) => {
                    let instance = self.create_bean(definition, context).await?;
                    let instance = Arc::clone(
                        self.singletons
                            .entry(name.to_string())
                            .or_insert(instance)
                            .value(),
                    );
                    drop(guard);
                    return Ok(instance);
                }
                SingletonClaim::Wait(mut receiver) => {
                    // 正在创建的单例若依赖当前解析链中的名称，等待将永远不会结束
                    let blocked_on = context.callers().iter().find(|caller| {
                        self.detector.reaches_any(
                            &self.registry,
                            name,
                            std::slice::from_ref(*caller),
                        )
                    });
                    if let Some(caller) = blocked_on {
                        let mut chain = context.resolution_chain.clone();
                        chain.push(caller.clone());
                        return Err(BeanError::circular_reference(&chain));
                    }
                    debug!("等待其他任务创建单例: {}", name);
                    // 发送端在创建结束时释放，`changed` 随即返回
                    let _ = receiver.changed().await;
                }
            }
        }
    }

    async fn create_bean(
        &self,
        definition: &BeanDefinition,
        context: &mut ResolveContext,
    ) -> BeanResult<BeanInstance> {
        let name = definition.name();

        debug!("Bean {} 状态: {:?}", name, BeanLifecycleState::Instantiating);
        let mut bean = self.types.create_instance(definition)?;

        debug!("Bean {} 状态: {:?}", name, BeanLifecycleState::Populating);
        self.populate(definition, bean.as_mut(), context).await?;

        debug!("Bean {} 状态: {:?}", name, BeanLifecycleState::Initializing);
        self.initializer.initialize(definition, bean.as_mut())?;

        debug!(
            "Bean {} 状态: {:?} ({})",
            name,
            BeanLifecycleState::Ready,
            definition.scope()
        );
        self.created_instances.fetch_add(1, Ordering::Relaxed);
        Ok(Arc::from(bean.into_any()))
    }

    async fn populate(
        &self,
        definition: &BeanDefinition,
        bean: &mut dyn Bean,
        context: &mut ResolveContext,
    ) -> BeanResult<()> {
        for property in definition.properties() {
            let value = match &property.value {
                PropertyValue::Literal(literal) => self.populator.resolve_literal(literal)?,
                PropertyValue::Reference(reference) => ResolvedValue::Bean {
                    name: reference.bean_name.clone(),
                    instance: self.resolve(&reference.bean_name, context).await?,
                },
            };
            self.populator.apply(bean, &property.name, value)?;
        }
        Ok(())
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_depth: self.config.max_resolution_depth,
        }
    }
}

#[async_trait]
impl BeanFactory for DefaultBeanContainer {
    async fn get_bean(&self, name: &str) -> BeanResult<BeanInstance> {
        let mut context = ResolveContext::with_options(self.resolve_options());
        let result = self.resolve(name, &mut context).await;
        if let Err(err) = &result {
            self.resolution_errors.fetch_add(1, Ordering::Relaxed);
            warn!("获取 Bean 失败: {} - {}", name, err);
        }
        result
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains_definition(name)
    }

    fn is_singleton(&self, name: &str) -> BeanResult<bool> {
        self.registry
            .get_definition(name)
            .map(|definition| definition.is_singleton())
            .ok_or_else(|| BeanError::unknown_bean(name))
    }

    fn bean_names(&self) -> Vec<String> {
        self.registry.definition_names()
    }
}

impl std::fmt::Debug for DefaultBeanContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultBeanContainer")
            .field("id", &self.id)
            .field("definitions", &self.registry.definition_names())
            .field("active_singletons", &self.singletons.len())
            .finish()
    }
}
