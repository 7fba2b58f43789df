//! 通用元素树

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 配置元素
///
/// 由元素名称、属性表和有序的子元素组成，与具体文档格式无关。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigElement {
    /// 元素名称（标签）
    pub name: String,
    /// 属性
    pub attributes: BTreeMap<String, String>,
    /// 子元素，保持文档顺序
    pub children: Vec<ConfigElement>,
}

impl ConfigElement {
    /// 创建新的元素
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// 设置属性
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// 添加子元素
    pub fn with_child(mut self, child: ConfigElement) -> Self {
        self.children.push(child);
        self
    }

    /// 获取属性值
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// 获取非空白的属性值
    pub fn non_blank_attribute(&self, key: &str) -> Option<&str> {
        self.attribute(key)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// 按名称筛选子元素
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}
