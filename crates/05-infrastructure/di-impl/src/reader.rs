//! 基于元素树的 Bean 定义加载器
//!
//! 支持的元素：
//!
//! ```text
//! beans
//! ├── bean (id?, class, scope?, init-method?)
//! │   └── property (name, value | ref, type?)
//! ├── description        (忽略)
//! └── component-scan     (忽略)
//! ```

use config_abstractions::ConfigElement;
use di_abstractions::{
    BeanDefinition, BeanDefinitionReader, BeanDefinitionRegistry, LiteralValue,
    PropertyAssignment, TypeResolver,
};
use infrastructure_common::{BeanError, BeanResult, BeanScope};
use std::collections::HashSet;
use tracing::{debug, info};

/// Bean 元素名称
pub const BEAN_ELEMENT: &str = "bean";
/// 属性元素名称
pub const PROPERTY_ELEMENT: &str = "property";

const ID_ATTRIBUTE: &str = "id";
const CLASS_ATTRIBUTE: &str = "class";
const SCOPE_ATTRIBUTE: &str = "scope";
const INIT_METHOD_ATTRIBUTE: &str = "init-method";
const NAME_ATTRIBUTE: &str = "name";
const VALUE_ATTRIBUTE: &str = "value";
const REF_ATTRIBUTE: &str = "ref";
const TYPE_ATTRIBUTE: &str = "type";

/// 默认忽略的扩展元素
pub const DEFAULT_IGNORED_ELEMENTS: [&str; 2] = ["description", "component-scan"];

/// 元素树定义加载器
pub struct ElementDefinitionReader<'a> {
    registry: &'a mut dyn BeanDefinitionRegistry,
    types: &'a dyn TypeResolver,
    ignored_elements: HashSet<String>,
}

impl<'a> ElementDefinitionReader<'a> {
    /// 创建加载器
    pub fn new(registry: &'a mut dyn BeanDefinitionRegistry, types: &'a dyn TypeResolver) -> Self {
        Self {
            registry,
            types,
            ignored_elements: DEFAULT_IGNORED_ELEMENTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    /// 将元素名称加入忽略列表
    pub fn ignore_element(mut self, name: impl Into<String>) -> Self {
        self.ignored_elements.insert(name.into());
        self
    }

    /// 批量加入忽略列表
    pub fn ignore_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_elements
            .extend(names.into_iter().map(Into::into));
        self
    }

    fn parse_bean(&self, element: &ConfigElement) -> BeanResult<BeanDefinition> {
        let class_name = element.non_blank_attribute(CLASS_ATTRIBUTE).ok_or_else(|| {
            BeanError::configuration(format!(
                "bean 元素缺少 class 属性 (id: {})",
                element.attribute(ID_ATTRIBUTE).unwrap_or("<none>")
            ))
        })?;

        let descriptor = self.types.resolve_type(class_name).ok_or_else(|| {
            BeanError::configuration(format!("无法解析 Bean 类型: {}", class_name))
        })?;

        let name = element
            .non_blank_attribute(ID_ATTRIBUTE)
            .map(str::to_string)
            .unwrap_or_else(|| descriptor.type_info.short_name().to_string());

        let scope = BeanScope::parse(element.attribute(SCOPE_ATTRIBUTE)).ok_or_else(|| {
            BeanError::configuration(format!(
                "Bean '{}' 的作用域无效: {}",
                name,
                element.attribute(SCOPE_ATTRIBUTE).unwrap_or_default()
            ))
        })?;

        let mut definition = BeanDefinition::new(name.as_str(), class_name, descriptor.type_info)
            .with_scope(scope);
        if let Some(method) = element.non_blank_attribute(INIT_METHOD_ATTRIBUTE) {
            definition = definition.with_init_method(method);
        }

        for child in &element.children {
            if child.name != PROPERTY_ELEMENT {
                return Err(BeanError::configuration(format!(
                    "Bean '{}' 包含不支持的子元素: {}",
                    name, child.name
                )));
            }
            definition = definition.with_property(parse_property(&name, child)?);
        }

        Ok(definition)
    }
}

fn parse_property(bean_name: &str, element: &ConfigElement) -> BeanResult<PropertyAssignment> {
    let name = element.non_blank_attribute(NAME_ATTRIBUTE).ok_or_else(|| {
        BeanError::configuration(format!("Bean '{}' 的 property 缺少 name 属性", bean_name))
    })?;

    let value = element.attribute(VALUE_ATTRIBUTE);
    let reference = element.attribute(REF_ATTRIBUTE);
    let target_type = element.non_blank_attribute(TYPE_ATTRIBUTE);

    match (value, reference) {
        (Some(value), None) => {
            let literal = match target_type {
                Some(target_type) => LiteralValue::typed(value, target_type),
                None => LiteralValue::new(value),
            };
            Ok(PropertyAssignment::literal(name, literal))
        }
        (None, Some(reference)) => {
            let reference = reference.trim();
            if reference.is_empty() {
                return Err(BeanError::configuration(format!(
                    "Bean '{}' 的属性 '{}' 引用名称为空",
                    bean_name, name
                )));
            }
            if target_type.is_some() {
                return Err(BeanError::configuration(format!(
                    "Bean '{}' 的属性 '{}' 是引用，不能声明 type",
                    bean_name, name
                )));
            }
            Ok(PropertyAssignment::reference(name, reference))
        }
        (Some(_), Some(_)) => Err(BeanError::configuration(format!(
            "Bean '{}' 的属性 '{}' 不能同时声明 value 和 ref",
            bean_name, name
        ))),
        (None, None) => Err(BeanError::configuration(format!(
            "Bean '{}' 的属性 '{}' 必须声明 value 或 ref",
            bean_name, name
        ))),
    }
}

impl BeanDefinitionReader for ElementDefinitionReader<'_> {
    fn load_definitions(&mut self, root: &ConfigElement) -> BeanResult<usize> {
        let mut loaded = 0;

        for element in &root.children {
            if element.name == BEAN_ELEMENT {
                let definition = self.parse_bean(element)?;
                self.registry.register_definition(definition)?;
                loaded += 1;
            } else if self.ignored_elements.contains(&element.name) {
                debug!("忽略扩展元素: {}", element.name);
            } else {
                return Err(BeanError::configuration(format!(
                    "不支持的配置元素: {}",
                    element.name
                )));
            }
        }

        info!("加载 Bean 定义完成: {} 个", loaded);
        Ok(loaded)
    }
}
