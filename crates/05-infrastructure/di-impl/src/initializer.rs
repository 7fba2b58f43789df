//! 生命周期初始化

use crate::type_registry::panic_message;
use di_abstractions::BeanDefinition;
use infrastructure_common::{Bean, BeanError, BeanResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

/// 初始化方法调用器
#[derive(Debug, Default, Clone, Copy)]
pub struct LifecycleInitializer;

impl LifecycleInitializer {
    /// 在字段填充完成后调用定义中声明的初始化方法
    pub fn initialize(&self, definition: &BeanDefinition, bean: &mut dyn Bean) -> BeanResult<()> {
        let Some(method) = definition.init_method() else {
            return Ok(());
        };

        debug!("调用初始化方法: {}.{}()", definition.name(), method);
        let type_name = bean.bean_type_name();
        match catch_unwind(AssertUnwindSafe(|| bean.invoke_method(method))) {
            Ok(result) => result,
            Err(payload) => Err(BeanError::invocation(
                type_name,
                method,
                format!("方法发生 panic: {}", panic_message(payload.as_ref())),
            )),
        }
    }
}
