//! Bean 作用域与生命周期

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bean 作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeanScope {
    /// 单例模式 - 容器生命周期内每个名称只创建一个实例
    Singleton,
    /// 原型模式 - 每次请求都创建新实例，容器不保留
    Prototype,
}

impl BeanScope {
    /// 解析配置中的作用域属性
    ///
    /// 空白值按默认的 `singleton` 处理；无法识别的值返回 `None`。
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() || raw.eq_ignore_ascii_case("singleton") {
            Some(Self::Singleton)
        } else if raw.eq_ignore_ascii_case("prototype") {
            Some(Self::Prototype)
        } else {
            None
        }
    }

    /// 作用域名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Prototype => "prototype",
        }
    }
}

impl Default for BeanScope {
    fn default() -> Self {
        Self::Singleton
    }
}

impl fmt::Display for BeanScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bean 实例生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeanLifecycleState {
    /// 已分配原始对象，字段未设置
    Instantiating,
    /// 正在设置字段，可能递归创建其他 Bean
    Populating,
    /// 正在执行初始化方法
    Initializing,
    /// 可用
    Ready,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_defaults_to_singleton() {
        assert_eq!(BeanScope::parse(None), Some(BeanScope::Singleton));
        assert_eq!(BeanScope::parse(Some("")), Some(BeanScope::Singleton));
        assert_eq!(BeanScope::parse(Some("   ")), Some(BeanScope::Singleton));
    }

    #[test]
    fn test_scope_parse_known_values() {
        assert_eq!(BeanScope::parse(Some("prototype")), Some(BeanScope::Prototype));
        assert_eq!(BeanScope::parse(Some("Singleton")), Some(BeanScope::Singleton));
        assert_eq!(BeanScope::parse(Some("request")), None);
    }
}
