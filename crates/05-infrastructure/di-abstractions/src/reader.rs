//! Bean 定义加载器抽象接口

use config_abstractions::ConfigElement;
use infrastructure_common::BeanResult;

/// Bean 定义加载器
///
/// 遍历配置元素树，将 Bean 定义注册到注册表。遇到第一个错误即中止加载。
pub trait BeanDefinitionReader {
    /// 加载定义，返回本次注册的定义数量
    fn load_definitions(&mut self, root: &ConfigElement) -> BeanResult<usize>;
}
