//! 字面量类型转换器

use di_abstractions::{ConversionService, TypeConverter};
use infrastructure_common::{BeanError, BeanResult, ResolvedValue};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// 基于 [`FromStr`] 的转换器
pub struct ParseConverter<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> ParseConverter<T> {
    /// 创建转换器
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for ParseConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypeConverter for ParseConverter<T>
where
    T: FromStr + Any + Send + Sync,
    T::Err: fmt::Display,
{
    fn target_type(&self) -> &str {
        std::any::type_name::<T>()
    }

    fn convert(&self, raw: &str) -> Result<Box<dyn Any + Send + Sync>, String> {
        raw.trim()
            .parse::<T>()
            .map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
            .map_err(|err| err.to_string())
    }
}

/// 字符串转换器，原样保留内容
#[derive(Debug, Default, Clone, Copy)]
pub struct StringConverter;

impl TypeConverter for StringConverter {
    fn target_type(&self) -> &str {
        "String"
    }

    fn convert(&self, raw: &str) -> Result<Box<dyn Any + Send + Sync>, String> {
        Ok(Box::new(raw.to_string()))
    }
}

/// 转换器注册表
///
/// 以类型标识（配置中 `type` 属性的值）索引转换器。
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn TypeConverter>>,
}

impl ConverterRegistry {
    /// 创建带内置转换器的注册表
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let string: Arc<dyn TypeConverter> = Arc::new(StringConverter);
        let integer: Arc<dyn TypeConverter> = Arc::new(ParseConverter::<i32>::new());
        let long: Arc<dyn TypeConverter> = Arc::new(ParseConverter::<i64>::new());
        let boolean: Arc<dyn TypeConverter> = Arc::new(ParseConverter::<bool>::new());
        let double: Arc<dyn TypeConverter> = Arc::new(ParseConverter::<f64>::new());

        for tag in ["string", "String", "java.lang.String"] {
            registry.register_shared(tag, Arc::clone(&string));
        }
        for tag in ["integer", "int", "i32", "java.lang.Integer"] {
            registry.register_shared(tag, Arc::clone(&integer));
        }
        for tag in ["long", "i64", "java.lang.Long"] {
            registry.register_shared(tag, Arc::clone(&long));
        }
        for tag in ["boolean", "bool", "java.lang.Boolean"] {
            registry.register_shared(tag, Arc::clone(&boolean));
        }
        for tag in ["double", "f64", "java.lang.Double"] {
            registry.register_shared(tag, Arc::clone(&double));
        }
        registry
    }

    /// 创建不含任何转换器的注册表
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// 注册转换器，同名标识覆盖原有转换器
    pub fn register_converter<C>(&mut self, type_tag: impl Into<String>, converter: C) -> &mut Self
    where
        C: TypeConverter + 'static,
    {
        self.register_shared(type_tag, Arc::new(converter))
    }

    fn register_shared(
        &mut self,
        type_tag: impl Into<String>,
        converter: Arc<dyn TypeConverter>,
    ) -> &mut Self {
        let type_tag = type_tag.into();
        debug!("注册类型转换器: {} -> {}", type_tag, converter.target_type());
        self.converters.insert(type_tag, converter);
        self
    }

    /// 已注册的类型标识
    pub fn type_tags(&self) -> Vec<String> {
        let mut tags: Vec<_> = self.converters.keys().cloned().collect();
        tags.sort();
        tags
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("type_tags", &self.type_tags())
            .finish()
    }
}

impl ConversionService for ConverterRegistry {
    fn can_convert(&self, type_tag: &str) -> bool {
        self.converters.contains_key(type_tag)
    }

    fn convert(&self, type_tag: &str, raw: &str) -> BeanResult<ResolvedValue> {
        let converter = self
            .converters
            .get(type_tag)
            .ok_or_else(|| BeanError::conversion(type_tag, raw, "未注册该类型的转换器"))?;
        let value = converter
            .convert(raw)
            .map_err(|message| BeanError::conversion(type_tag, raw, message))?;
        Ok(ResolvedValue::Converted {
            target_type: type_tag.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::FromResolvedValue;

    #[test]
    fn test_integer_conversion() {
        let registry = ConverterRegistry::new();
        let value = registry.convert("integer", "42").unwrap();
        assert_eq!(i32::from_resolved(value).unwrap(), 42);

        let value = registry.convert("java.lang.Integer", " 7 ").unwrap();
        assert_eq!(i32::from_resolved(value).unwrap(), 7);
    }

    #[test]
    fn test_other_builtin_conversions() {
        let registry = ConverterRegistry::new();
        assert_eq!(
            i64::from_resolved(registry.convert("long", "9000000000").unwrap()).unwrap(),
            9_000_000_000
        );
        assert!(bool::from_resolved(registry.convert("boolean", "true").unwrap()).unwrap());
        assert_eq!(
            f64::from_resolved(registry.convert("double", "2.5").unwrap()).unwrap(),
            2.5
        );
        assert_eq!(
            String::from_resolved(registry.convert("java.lang.String", " keep ").unwrap()).unwrap(),
            " keep "
        );
    }

    #[test]
    fn test_parse_failure_is_conversion_error() {
        let registry = ConverterRegistry::new();
        let err = registry.convert("integer", "forty-two").unwrap_err();
        assert!(matches!(err, BeanError::Conversion { ref value, .. } if value == "forty-two"));
    }

    #[test]
    fn test_unknown_tag_is_conversion_error() {
        let registry = ConverterRegistry::new();
        assert!(!registry.can_convert("uuid"));
        let err = registry.convert("uuid", "x").unwrap_err();
        assert!(matches!(err, BeanError::Conversion { ref target_type, .. } if target_type == "uuid"));
    }

    #[test]
    fn test_custom_converter() {
        let mut registry = ConverterRegistry::empty();
        registry.register_converter("u16", ParseConverter::<u16>::new());
        assert_eq!(
            u16::from_resolved(registry.convert("u16", "8080").unwrap()).unwrap(),
            8080
        );
        assert!(!registry.can_convert("integer"));
    }
}
