//! 属性填充
//!
//! 字面量在这里解析，引用由容器递归解析后交给 [`PropertyPopulator::apply`]。

use crate::converters::ConverterRegistry;
use di_abstractions::{ConversionService, LiteralValue};
use infrastructure_common::{Bean, BeanResult, ResolvedValue};
use tracing::trace;

/// 属性填充器
#[derive(Debug, Clone, Default)]
pub struct PropertyPopulator {
    converters: ConverterRegistry,
}

impl PropertyPopulator {
    /// 使用指定转换器创建
    pub fn new(converters: ConverterRegistry) -> Self {
        Self { converters }
    }

    /// 转换器注册表
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// 解析字面量
    ///
    /// 未标注类型时原样作为字符串，否则交给对应的转换器。
    pub fn resolve_literal(&self, literal: &LiteralValue) -> BeanResult<ResolvedValue> {
        match &literal.target_type {
            None => Ok(ResolvedValue::Text(literal.value.clone())),
            Some(target_type) => self.converters.convert(target_type, &literal.value),
        }
    }

    /// 将解析后的值写入字段
    pub fn apply(&self, bean: &mut dyn Bean, field: &str, value: ResolvedValue) -> BeanResult<()> {
        trace!("设置字段: {}.{} = {:?}", bean.bean_type_name(), field, value);
        bean.set_property(field, value)
    }
}
