//! 元数据定义
//!
//! 提供 Bean 类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 简短类型名称（不含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        let path = std::any::type_name::<T>();
        Self {
            name: simple_name(path).to_string(),
            id: TypeId::of::<T>(),
            path: path.to_string(),
        }
    }

    /// 获取简短的类型名称
    pub fn short_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// 取类型引用的简单名称
///
/// 同时接受 `a::b::Name` 与 `a.b.Name` 两种写法，泛型参数部分被忽略。
pub fn simple_name(path: &str) -> &str {
    let base = path.split('<').next().unwrap_or(path);
    base.rsplit(|c| c == ':' || c == '.')
        .find(|segment| !segment.is_empty())
        .unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UserService;

    #[test]
    fn test_simple_name() {
        assert_eq!(simple_name("demo::domain::UserService"), "UserService");
        assert_eq!(simple_name("com.spring.custom.dao.UserDao"), "UserDao");
        assert_eq!(simple_name("Plain"), "Plain");
        assert_eq!(simple_name("demo::Wrapper<demo::Inner>"), "Wrapper");
    }

    #[test]
    fn test_type_info_of() {
        let info = TypeInfo::of::<UserService>();
        assert_eq!(info.short_name(), "UserService");
        assert!(info.path.ends_with("::UserService"));
        assert_eq!(info.id, TypeId::of::<UserService>());
    }
}
