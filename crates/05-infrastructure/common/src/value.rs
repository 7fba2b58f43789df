//! 属性值定义
//!
//! 配置中的字面量和引用在赋值前被解析为 [`ResolvedValue`]，再由字段类型的
//! [`FromResolvedValue`] 实现完成最终转换。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 容器管理的实例
pub type BeanInstance = Arc<dyn Any + Send + Sync>;

/// 解析后的属性值
pub enum ResolvedValue {
    /// 未标注目标类型的字面量，原样使用
    Text(String),
    /// 经类型转换器转换后的值
    Converted {
        /// 目标类型标识
        target_type: String,
        /// 转换结果
        value: Box<dyn Any + Send + Sync>,
    },
    /// 引用的 Bean 实例
    Bean {
        /// 被引用的 Bean 名称
        name: String,
        /// 实例
        instance: BeanInstance,
    },
}

impl ResolvedValue {
    /// 创建转换后的值
    pub fn converted<T: Any + Send + Sync>(target_type: impl Into<String>, value: T) -> Self {
        Self::Converted {
            target_type: target_type.into(),
            value: Box::new(value),
        }
    }

    /// 值的简短描述，用于错误信息
    pub fn describe(&self) -> String {
        match self {
            Self::Text(_) => "未标注类型的字符串".to_string(),
            Self::Converted { target_type, .. } => format!("{} 类型的值", target_type),
            Self::Bean { name, .. } => format!("Bean 引用 '{}'", name),
        }
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Converted { target_type, .. } => f
                .debug_struct("Converted")
                .field("target_type", target_type)
                .field("value", &"<converted>")
                .finish(),
            Self::Bean { name, .. } => f
                .debug_struct("Bean")
                .field("name", name)
                .field("instance", &"<bean>")
                .finish(),
        }
    }
}

/// 从解析后的值构造字段值
///
/// 错误信息描述期望的类型与实际的值，由调用方补充字段上下文。
pub trait FromResolvedValue: Sized {
    /// 转换
    fn from_resolved(value: ResolvedValue) -> Result<Self, String>;
}

fn mismatch<T>(value: &ResolvedValue) -> String {
    format!(
        "期望 {}，实际为 {}",
        std::any::type_name::<T>(),
        value.describe()
    )
}

impl FromResolvedValue for String {
    fn from_resolved(value: ResolvedValue) -> Result<Self, String> {
        match value {
            ResolvedValue::Text(text) => Ok(text),
            ResolvedValue::Converted { target_type, value } => match value.downcast::<String>() {
                Ok(text) => Ok(*text),
                Err(_) => Err(format!("期望 String，实际为 {} 类型的值", target_type)),
            },
            other => Err(mismatch::<String>(&other)),
        }
    }
}

macro_rules! impl_from_resolved_for_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromResolvedValue for $ty {
                fn from_resolved(value: ResolvedValue) -> Result<Self, String> {
                    match value {
                        ResolvedValue::Converted { target_type, value } => {
                            match value.downcast::<$ty>() {
                                Ok(primitive) => Ok(*primitive),
                                Err(_) => Err(format!(
                                    "期望 {}，实际为 {} 类型的值",
                                    stringify!($ty),
                                    target_type
                                )),
                            }
                        }
                        other => Err(mismatch::<$ty>(&other)),
                    }
                }
            }
        )*
    };
}

impl_from_resolved_for_primitive!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, bool, char);

impl<T> FromResolvedValue for Option<T>
where
    T: FromResolvedValue,
{
    fn from_resolved(value: ResolvedValue) -> Result<Self, String> {
        T::from_resolved(value).map(Some)
    }
}

impl<T> FromResolvedValue for Arc<T>
where
    T: Any + Send + Sync,
{
    fn from_resolved(value: ResolvedValue) -> Result<Self, String> {
        match value {
            ResolvedValue::Bean { name, instance } => instance.downcast::<T>().map_err(|_| {
                format!(
                    "Bean '{}' 不是 {} 类型",
                    name,
                    std::any::type_name::<T>()
                )
            }),
            ResolvedValue::Converted { target_type, value } => match value.downcast::<Arc<T>>() {
                Ok(shared) => Ok(*shared),
                Err(_) => Err(format!(
                    "期望 {}，实际为 {} 类型的值",
                    std::any::type_name::<Arc<T>>(),
                    target_type
                )),
            },
            other => Err(mismatch::<Arc<T>>(&other)),
        }
    }
}
