//! 结构化文档到元素树的转换
//!
//! 转换规则：
//!
//! - 对象中的标量成员成为属性（数字、布尔值转为字符串，`null` 忽略）
//! - 对象成员成为一个同名子元素
//! - 对象数组成员的每一项成为一个同名子元素
//! - 标量数组无法表达为元素树，视为文档错误
//! - 数字按解析后的值重新格式化（`1.10` 变为 `"1.1"`），因此没有 `type`
//!   成员的对象中，数字形式的 `value` 视为文档错误，需写成字符串

use config_abstractions::ConfigElement;
use infrastructure_common::{ConfigError, ConfigResult};
use serde_json::{Map, Value};

/// 文档根元素名称
pub const ROOT_ELEMENT: &str = "beans";

/// 字面量值成员
const VALUE_MEMBER: &str = "value";

/// 字面量类型成员
const TYPE_MEMBER: &str = "type";

/// 将文档根值转换为元素树
pub fn document_to_element(value: &Value) -> ConfigResult<ConfigElement> {
    value_to_element(ROOT_ELEMENT, value)
}

/// 将 JSON 值转换为指定名称的元素
pub fn value_to_element(name: &str, value: &Value) -> ConfigResult<ConfigElement> {
    match value {
        Value::Object(members) => object_to_element(name, members),
        Value::Null => Ok(ConfigElement::new(name)),
        other => Err(ConfigError::invalid_document(format!(
            "元素 {} 必须是对象，实际为 {}",
            name,
            kind_of(other)
        ))),
    }
}

fn object_to_element(name: &str, members: &Map<String, Value>) -> ConfigResult<ConfigElement> {
    let mut element = ConfigElement::new(name);

    for (key, value) in members {
        match value {
            Value::Null => {}
            Value::String(text) => {
                element.attributes.insert(key.clone(), text.clone());
            }
            Value::Bool(flag) => {
                element.attributes.insert(key.clone(), flag.to_string());
            }
            Value::Number(number) => {
                if key == VALUE_MEMBER && !members.contains_key(TYPE_MEMBER) {
                    return Err(ConfigError::invalid_document(format!(
                        "{}.{} 的数字 {} 未标注 type，会丢失原始写法，请写成字符串",
                        name, key, number
                    )));
                }
                element.attributes.insert(key.clone(), number.to_string());
            }
            Value::Object(nested) => {
                element.children.push(object_to_element(key, nested)?);
            }
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Object(nested) => {
                            element.children.push(object_to_element(key, nested)?);
                        }
                        other => {
                            return Err(ConfigError::invalid_document(format!(
                                "{}.{} 的数组元素必须是对象，实际为 {}",
                                name,
                                key,
                                kind_of(other)
                            )));
                        }
                    }
                }
            }
        }
    }

    Ok(element)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "布尔值",
        Value::Number(_) => "数字",
        Value::String(_) => "字符串",
        Value::Array(_) => "数组",
        Value::Object(_) => "对象",
    }
}

/// 将 TOML 值转换为 JSON 值
pub fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number(serde_json::Number::from(*i)),
        toml::Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Array(arr) => Value::Array(arr.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
    }
}
