//! 解析上下文
//!
//! 每次顶层 `get_bean` 调用拥有一个上下文，递归解析引用时沿用同一个上下文。

use infrastructure_common::{join_chain, BeanError, BeanResult};

/// 解析上下文
#[derive(Debug, Clone, Default)]
pub struct ResolveContext {
    /// 当前解析链，用于检测循环引用
    pub resolution_chain: Vec<String>,
    /// 解析选项
    pub options: ResolveOptions,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定选项创建
    pub fn with_options(options: ResolveOptions) -> Self {
        Self {
            resolution_chain: Vec::new(),
            options,
        }
    }

    /// 将名称加入解析链
    ///
    /// 名称已在链中时返回 [`BeanError::CircularReference`]，超过最大深度时返回
    /// [`BeanError::ResolutionDepthExceeded`]。
    pub fn push_name(&mut self, name: &str) -> BeanResult<()> {
        if self.resolution_chain.iter().any(|entry| entry == name) {
            let mut chain = self.resolution_chain.clone();
            chain.push(name.to_string());
            return Err(BeanError::circular_reference(&chain));
        }
        if self.resolution_chain.len() >= self.options.max_depth {
            let mut chain = self.resolution_chain.clone();
            chain.push(name.to_string());
            return Err(BeanError::ResolutionDepthExceeded {
                max_depth: self.options.max_depth,
                chain: join_chain(&chain),
            });
        }
        self.resolution_chain.push(name.to_string());
        Ok(())
    }

    /// 从解析链中移除最后一个名称
    pub fn pop_name(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前名称之前的调用方
    pub fn callers(&self) -> &[String] {
        match self.resolution_chain.split_last() {
            Some((_, callers)) => callers,
            None => &[],
        }
    }

    /// 当前深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }
}

/// 解析选项
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// 最大递归深度
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}
