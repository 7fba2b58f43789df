//! 字面量类型转换抽象

use infrastructure_common::{BeanResult, ResolvedValue};
use std::any::Any;

/// 类型转换器
///
/// 将配置中的字符串转换为目标类型的值。
pub trait TypeConverter: Send + Sync {
    /// 转换结果的 Rust 类型名称
    fn target_type(&self) -> &str;

    /// 执行转换，失败时返回原因
    fn convert(&self, raw: &str) -> Result<Box<dyn Any + Send + Sync>, String>;
}

/// 转换服务
pub trait ConversionService: Send + Sync {
    /// 是否存在指定类型标识的转换器
    fn can_convert(&self, type_tag: &str) -> bool;

    /// 按类型标识转换字面量
    ///
    /// 标识未注册或转换失败时返回 [`infrastructure_common::BeanError::Conversion`]。
    fn convert(&self, type_tag: &str, raw: &str) -> BeanResult<ResolvedValue>;
}
