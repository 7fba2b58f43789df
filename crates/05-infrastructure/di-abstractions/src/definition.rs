//! Bean 定义模型
//!
//! 定义在加载完成后不可变，注册表以 `Arc<BeanDefinition>` 共享。

use infrastructure_common::{BeanScope, TypeInfo};

/// 字面量值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralValue {
    /// 原始字符串
    pub value: String,
    /// 目标类型标识，缺省时按字符串使用
    pub target_type: Option<String>,
}

impl LiteralValue {
    /// 创建未标注类型的字面量
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            target_type: None,
        }
    }

    /// 创建带目标类型的字面量
    pub fn typed(value: impl Into<String>, target_type: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            target_type: Some(target_type.into()),
        }
    }
}

/// Bean 引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanReference {
    /// 被引用的 Bean 名称
    pub bean_name: String,
}

impl BeanReference {
    /// 创建引用
    pub fn new(bean_name: impl Into<String>) -> Self {
        Self {
            bean_name: bean_name.into(),
        }
    }
}

/// 属性值来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// 字面量
    Literal(LiteralValue),
    /// 其他 Bean 的引用
    Reference(BeanReference),
}

impl PropertyValue {
    /// 被引用的 Bean 名称
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Reference(reference) => Some(&reference.bean_name),
            Self::Literal(_) => None,
        }
    }
}

/// 属性赋值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAssignment {
    /// 目标字段名称
    pub name: String,
    /// 值来源
    pub value: PropertyValue,
}

impl PropertyAssignment {
    /// 字面量赋值
    pub fn literal(name: impl Into<String>, value: LiteralValue) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Literal(value),
        }
    }

    /// 引用赋值
    pub fn reference(name: impl Into<String>, bean_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: PropertyValue::Reference(BeanReference::new(bean_name)),
        }
    }
}

/// Bean 定义
#[derive(Debug, Clone)]
pub struct BeanDefinition {
    name: String,
    class_name: String,
    type_info: TypeInfo,
    scope: BeanScope,
    init_method: Option<String>,
    properties: Vec<PropertyAssignment>,
}

impl BeanDefinition {
    /// 创建新的 Bean 定义
    ///
    /// `class_name` 为配置中书写的类型引用，`type_info` 为其解析结果。
    pub fn new(name: impl Into<String>, class_name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            class_name: class_name.into(),
            type_info,
            scope: BeanScope::default(),
            init_method: None,
            properties: Vec::new(),
        }
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: BeanScope) -> Self {
        self.scope = scope;
        self
    }

    /// 设置初始化方法
    pub fn with_init_method(mut self, method: impl Into<String>) -> Self {
        self.init_method = Some(method.into());
        self
    }

    /// 添加属性赋值
    pub fn with_property(mut self, property: PropertyAssignment) -> Self {
        self.properties.push(property);
        self
    }

    /// Bean 名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 配置中的类型引用
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// 解析后的类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 作用域
    pub fn scope(&self) -> BeanScope {
        self.scope
    }

    /// 是否单例
    pub fn is_singleton(&self) -> bool {
        self.scope == BeanScope::Singleton
    }

    /// 初始化方法
    pub fn init_method(&self) -> Option<&str> {
        self.init_method.as_deref()
    }

    /// 属性赋值，保持配置顺序
    pub fn properties(&self) -> &[PropertyAssignment] {
        &self.properties
    }

    /// 该定义直接引用的 Bean 名称
    pub fn references(&self) -> impl Iterator<Item = &str> + '_ {
        self.properties
            .iter()
            .filter_map(|property| property.value.reference())
    }
}
