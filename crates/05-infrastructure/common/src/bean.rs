//! Bean 基础接口定义
//!
//! 容器只通过字符串名称访问对象的字段和方法。这里定义的访问器表由
//! `#[derive(Bean)]` 生成，也可以手写实现。

use crate::errors::{BeanError, BeanResult, BoxError};
use crate::metadata::TypeInfo;
use crate::value::{FromResolvedValue, ResolvedValue};
use std::any::Any;

/// 容器可管理对象
///
/// 提供按名称设置字段、按名称调用无参方法的能力。
pub trait Bean: Any + Send + Sync {
    /// 类型名称，用于错误信息
    fn bean_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// 按字段名称赋值
    ///
    /// 字段不存在时返回 [`BeanError::MissingField`]，值无法赋给字段类型时返回
    /// [`BeanError::Access`]。
    fn set_property(&mut self, name: &str, value: ResolvedValue) -> BeanResult<()>;

    /// 按名称调用无参方法
    ///
    /// 方法不存在时返回 [`BeanError::NoSuchMethod`]，方法返回错误时返回
    /// [`BeanError::Invocation`]。
    fn invoke_method(&mut self, name: &str) -> BeanResult<()> {
        Err(BeanError::no_such_method(self.bean_type_name(), name))
    }

    /// 转换为可共享的 `Any`
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

/// 可注册到类型表的 Bean 类型
pub trait BeanType: Bean + Sized {
    /// 类型信息
    fn type_info() -> TypeInfo {
        TypeInfo::of::<Self>()
    }

    /// 无参构造器，`None` 表示该类型不能由容器直接构造
    fn constructor() -> Option<fn() -> Self>;
}

/// 初始化方法返回值
///
/// 允许被调用的方法返回 `()` 或 `Result<(), E>`。
pub trait InvocationOutcome {
    /// 统一为 `Result`
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl InvocationOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> InvocationOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// 将解析后的值转换为字段类型，失败时带上字段上下文
pub fn assign_field<T: FromResolvedValue>(
    type_name: &str,
    field: &str,
    value: ResolvedValue,
) -> BeanResult<T> {
    T::from_resolved(value).map_err(|message| BeanError::access(type_name, field, message))
}

/// 调用方法并统一错误
pub fn invoke_outcome<R: InvocationOutcome>(type_name: &str, method: &str, result: R) -> BeanResult<()> {
    result
        .into_outcome()
        .map_err(|source| BeanError::invocation(type_name, method, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counter {
        count: i32,
    }

    impl Bean for Counter {
        fn set_property(&mut self, name: &str, value: ResolvedValue) -> BeanResult<()> {
            match name {
                "count" => {
                    self.count = assign_field(self.bean_type_name(), name, value)?;
                    Ok(())
                }
                _ => Err(BeanError::missing_field(self.bean_type_name(), name)),
            }
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
            self
        }
    }

    #[test]
    fn test_assign_field_maps_errors_to_access() {
        let mut counter = Counter::default();
        let err = counter
            .set_property("count", ResolvedValue::Text("7".to_string()))
            .unwrap_err();
        assert!(matches!(err, BeanError::Access { ref field, .. } if field == "count"));

        counter
            .set_property("count", ResolvedValue::converted("integer", 7i32))
            .unwrap();
        assert_eq!(counter.count, 7);
    }

    #[test]
    fn test_default_invoke_method_reports_missing_method() {
        let mut counter = Counter::default();
        let err = counter.invoke_method("init").unwrap_err();
        assert!(matches!(err, BeanError::NoSuchMethod { ref method, .. } if method == "init"));
    }

    #[test]
    fn test_invoke_outcome() {
        assert!(invoke_outcome("T", "ok", ()).is_ok());
        let failed: Result<(), String> = Err("boom".to_string());
        let err = invoke_outcome("T", "init", failed).unwrap_err();
        assert!(matches!(err, BeanError::Invocation { .. }));
    }
}
