//! # 示例应用程序
//!
//! 演示如何从配置文档装配 Bean 并从容器中获取

use anyhow::{bail, Context, Result};
use clap::Parser;
use infrastructure_composition::prelude::*;
use infrastructure_composition::TomlDocumentProvider;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 内置的 Bean 定义，配置文件不存在时使用
const DEFAULT_BEANS: &str = include_str!("../config/beans.toml");

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/beans.toml")]
    config: String,

    /// 需要获取的 Bean 名称，未指定时获取全部
    #[arg(short, long)]
    bean: Vec<String>,

    /// 日志过滤指令，未指定时读取 `RUST_LOG`，默认 info
    #[arg(long)]
    log_level: Option<String>,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json_logs: bool,

    /// 启动时预先创建所有单例
    #[arg(long)]
    eager: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let container = build_container(&args).await?;
    info!("启动 Lorn IoC 示例应用");

    let names = if args.bean.is_empty() {
        container.bean_names()
    } else {
        args.bean.clone()
    };

    for name in &names {
        describe_bean(&container, name).await?;
    }

    demonstrate_scopes(&container).await?;

    let stats = container.stats();
    println!(
        "容器 {}: {} 个定义 ({} 单例, {} 原型), {} 个活跃单例, {} 次实例化",
        stats.container_id,
        stats.registered_definitions,
        stats.singleton_definitions,
        stats.prototype_definitions,
        stats.active_singletons,
        stats.created_instances
    );

    info!("应用已结束");
    Ok(())
}

/// 构建容器
async fn build_container(args: &Args) -> Result<DefaultBeanContainer> {
    let logging = LoggingConfig {
        filter: args.log_level.clone(),
        json_format: args.json_logs,
        ..LoggingConfig::default()
    };

    let mut builder = BeanContainerBuilder::new()
        .with_logging(logging)
        .register_type_alias::<DataSource>("DataSource")
        .register_type_alias::<UserDao>("UserDao")
        .register_type_alias::<UserService>("UserService")
        .register_type_alias::<RequestContext>("RequestContext")
        .with_config(ContainerConfig {
            eager_singletons: args.eager,
            ..Default::default()
        });

    // 添加配置文件（如果存在）
    if Path::new(&args.config).exists() {
        builder = builder.add_config_file(&args.config)?;
    } else {
        warn!("配置文件不存在，使用内置定义: {}", args.config);
        builder = builder.add_document_provider(TomlDocumentProvider::from_content(DEFAULT_BEANS));
    }

    let container = builder
        .enable_validation(true)
        .build()
        .await
        .context("构建 Bean 容器失败")?;
    Ok(container)
}

/// 获取并打印一个 Bean
async fn describe_bean(container: &DefaultBeanContainer, name: &str) -> Result<()> {
    let instance = container
        .get_bean(name)
        .await
        .with_context(|| format!("获取 Bean 失败: {}", name))?;
    let scope = if container.is_singleton(name)? {
        "singleton"
    } else {
        "prototype"
    };

    if let Some(data_source) = instance.downcast_ref::<DataSource>() {
        println!(
            "[{}] {} -> DataSource {{ url: {}, username: {}, max_connections: {} }}",
            scope, name, data_source.url, data_source.username, data_source.max_connections
        );
    } else if let Some(dao) = instance.downcast_ref::<UserDao>() {
        println!("[{}] {} -> UserDao {{ table: {} }}", scope, name, dao.table);
    } else if let Some(service) = instance.downcast_ref::<UserService>() {
        println!("[{}] {} -> {}", scope, name, service.greet("Rust"));
    } else if let Some(context) = instance.downcast_ref::<RequestContext>() {
        println!("[{}] {} -> RequestContext #{}", scope, name, context.request_id);
    } else {
        println!("[{}] {} -> 未知类型", scope, name);
    }
    Ok(())
}

/// 演示作用域
async fn demonstrate_scopes(container: &DefaultBeanContainer) -> Result<()> {
    let first = container.get_bean_as::<UserService>("UserService").await?;
    let second = container.get_bean_as::<UserService>("UserService").await?;
    if !Arc::ptr_eq(&first, &second) {
        bail!("单例 Bean 返回了不同实例");
    }

    let first = container
        .get_bean_as::<RequestContext>("requestContext")
        .await?;
    let second = container
        .get_bean_as::<RequestContext>("requestContext")
        .await?;
    info!(
        "原型 Bean 每次获取都是新实例: #{} / #{}",
        first.request_id, second.request_id
    );
    Ok(())
}

/// 数据源
#[derive(Debug, Default, Bean)]
#[bean(crate = "infrastructure_composition::common")]
pub struct DataSource {
    url: String,
    username: String,
    max_connections: i32,
}

/// 用户数据访问
#[derive(Debug, Default, Bean)]
#[bean(crate = "infrastructure_composition::common", methods(init))]
pub struct UserDao {
    data_source: Option<Arc<DataSource>>,
    table: String,
}

impl UserDao {
    fn init(&mut self) -> Result<(), String> {
        match &self.data_source {
            Some(data_source) if !data_source.url.is_empty() => {
                info!("UserDao 已连接: {} ({})", data_source.url, self.table);
                Ok(())
            }
            _ => Err("UserDao 缺少数据源".to_string()),
        }
    }
}

/// 用户服务
#[derive(Debug, Default, Bean)]
#[bean(crate = "infrastructure_composition::common", methods(start))]
pub struct UserService {
    user_dao: Option<Arc<UserDao>>,
    greeting: String,
    cache_enabled: bool,
    #[bean(skip)]
    started: bool,
}

impl UserService {
    fn start(&mut self) {
        self.started = self.user_dao.is_some();
        info!("UserService 已启动 (缓存: {})", self.cache_enabled);
    }

    /// 问候语
    pub fn greet(&self, user: &str) -> String {
        let table = self
            .user_dao
            .as_ref()
            .map_or("-", |dao| dao.table.as_str());
        format!(
            "{}, {}! (表: {}, 已启动: {})",
            self.greeting, user, table, self.started
        )
    }
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// 请求上下文，每次获取都是新实例
#[derive(Debug, Bean)]
#[bean(crate = "infrastructure_composition::common", constructor = "new")]
pub struct RequestContext {
    #[bean(skip)]
    request_id: u64,
}

impl RequestContext {
    /// 分配新的请求编号
    pub fn new() -> Self {
        Self {
            request_id: NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed),
        }
    }
}
