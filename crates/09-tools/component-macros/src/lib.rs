//! # Component Macros
//!
//! 这个 crate 提供了为 Bean 类型生成访问器表的派生宏。
//!
//! 容器不依赖运行时反射：字段赋值和初始化方法调用都通过 `#[derive(Bean)]`
//! 生成的按名称分派的 `match` 完成。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Bean;
//! use std::sync::Arc;
//!
//! #[derive(Default, Bean)]
//! #[bean(methods(init))]
//! pub struct UserService {
//!     user_dao: Option<Arc<UserDao>>,
//!     #[bean(skip)]
//!     ready: bool,
//! }
//!
//! impl UserService {
//!     fn init(&mut self) {
//!         self.ready = self.user_dao.is_some();
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod bean;
mod utils;

/// Bean 派生宏
///
/// 为结构体实现 `infrastructure_common::Bean` 与 `infrastructure_common::BeanType`。
///
/// # 结构体参数
///
/// - `constructor = "new"` - 使用指定的无参关联函数构造（默认使用 `Default::default`）
/// - `abstract` - 类型不可由容器构造
/// - `methods(init, ...)` - 可作为初始化方法调用的无参方法，返回 `()` 或 `Result<(), E>`
/// - `crate = "path"` - 生成代码引用的公共 crate 路径（默认 `::infrastructure_common`）
///
/// # 字段参数
///
/// - `skip` - 字段不可由配置设置
/// - `rename = "name"` - 额外的字段名称
///
/// 每个字段都可以用 Rust 名称和驼峰名称设置，例如 `max_connections` 与
/// `maxConnections`。
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    bean::derive_bean_impl(input)
}
