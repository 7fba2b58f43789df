//! Bean 容器构建器

use config_abstractions::{ConfigElement, DocumentProvider};
use config_impl::providers::{
    provider_for_path, JsonDocumentProvider, TomlDocumentProvider, YamlDocumentProvider,
};
use di_abstractions::{BeanDefinitionReader, ContainerConfig, TypeConverter};
use di_impl::{
    BeanTypeRegistry, ConverterRegistry, DefaultBeanContainer, DefaultBeanDefinitionRegistry,
    ElementDefinitionReader,
};
use infrastructure_common::{BeanType, BoxError, InfrastructureError, InfrastructureResult};
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// 待加载的配置文档
enum DocumentEntry {
    /// 由提供者解析的文档
    Provider(Box<dyn DocumentProvider>),
    /// 已构造的元素树
    Element(ConfigElement),
}

/// Bean 容器构建器
///
/// 使用建造者模式组装类型注册表、转换器和配置文档，构建可共享的容器
pub struct BeanContainerBuilder {
    /// 配置文档，按添加顺序加载
    documents: Vec<DocumentEntry>,
    /// 可实例化的类型
    types: BeanTypeRegistry,
    /// 字面量转换器
    converters: ConverterRegistry,
    /// 额外忽略的扩展元素
    ignored_elements: Vec<String>,
    /// 容器配置
    container_config: ContainerConfig,
    /// 构建时是否静态验证定义
    validation_enabled: bool,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl BeanContainerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            types: BeanTypeRegistry::new(),
            converters: ConverterRegistry::new(),
            ignored_elements: Vec::new(),
            container_config: ContainerConfig::default(),
            validation_enabled: false,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加 TOML 配置文件
    pub fn add_config_toml<P: AsRef<Path>>(self, path: P) -> InfrastructureResult<Self> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 TOML 配置文件: {}", path.display());
        Ok(self.add_document_provider(TomlDocumentProvider::new(path)))
    }

    /// 添加 JSON 配置文件
    pub fn add_config_json<P: AsRef<Path>>(self, path: P) -> InfrastructureResult<Self> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 JSON 配置文件: {}", path.display());
        Ok(self.add_document_provider(JsonDocumentProvider::new(path)))
    }

    /// 添加 YAML 配置文件
    pub fn add_config_yaml<P: AsRef<Path>>(self, path: P) -> InfrastructureResult<Self> {
        let path = ensure_exists(path.as_ref())?;
        info!("添加 YAML 配置文件: {}", path.display());
        Ok(self.add_document_provider(YamlDocumentProvider::new(path)))
    }

    /// 添加配置文件，按扩展名选择格式
    pub fn add_config_file<P: AsRef<Path>>(mut self, path: P) -> InfrastructureResult<Self> {
        let path = ensure_exists(path.as_ref())?;
        let provider = provider_for_path(path)?;
        info!("添加配置文件: {} ({})", path.display(), provider.name());
        self.documents.push(DocumentEntry::Provider(provider));
        Ok(self)
    }

    /// 添加自定义文档提供者
    pub fn add_document_provider<T: DocumentProvider + 'static>(mut self, provider: T) -> Self {
        debug!("添加文档提供者: {} ({})", provider.name(), provider.source());
        self.documents.push(DocumentEntry::Provider(Box::new(provider)));
        self
    }

    /// 添加已构造的元素树
    pub fn add_document(mut self, root: ConfigElement) -> Self {
        self.documents.push(DocumentEntry::Element(root));
        self
    }

    /// 注册 Bean 类型
    pub fn register_type<T: BeanType>(mut self) -> Self {
        self.types.register::<T>();
        self
    }

    /// 为 Bean 类型添加别名，类型尚未注册时一并注册
    pub fn register_type_alias<T: BeanType>(mut self, alias: impl Into<String>) -> Self {
        let path = T::type_info().path;
        if !self.types.contains(&path) {
            self.types.register::<T>();
        }
        self.types.register_alias(alias, path);
        self
    }

    /// 注册 Bean 类型并使用自定义构造闭包
    pub fn register_constructor<T, F, E>(mut self, construct: F) -> Self
    where
        T: BeanType,
        F: Fn() -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        self.types.register_constructor(construct);
        self
    }

    /// 注册类型转换器
    pub fn register_converter<C: TypeConverter + 'static>(
        mut self,
        type_tag: impl Into<String>,
        converter: C,
    ) -> Self {
        self.converters.register_converter(type_tag, converter);
        self
    }

    /// 忽略指定名称的扩展元素
    pub fn ignore_element(mut self, name: impl Into<String>) -> Self {
        self.ignored_elements.push(name.into());
        self
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.container_config = config;
        self
    }

    /// 启用或禁用构建时验证
    pub fn enable_validation(mut self, enabled: bool) -> Self {
        self.validation_enabled = enabled;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 构建容器
    pub async fn build(self) -> InfrastructureResult<DefaultBeanContainer> {
        // 只有在明确配置了日志时才初始化日志
        // 避免在测试环境中重复初始化
        if self.logging_enabled {
            self.logging_config.initialize()?;
        }

        info!("开始构建 Bean 容器: {} 个配置文档", self.documents.len());
        if self.types.is_empty() {
            warn!("未注册任何 Bean 类型");
        }

        let mut registry = DefaultBeanDefinitionRegistry::new();
        {
            let mut reader = ElementDefinitionReader::new(&mut registry, &self.types)
                .ignore_elements(self.ignored_elements.iter().cloned());
            for document in &self.documents {
                let loaded = match document {
                    DocumentEntry::Provider(provider) => {
                        let root = provider.load()?;
                        debug!("解析配置文档: {}", provider.source());
                        reader.load_definitions(&root)?
                    }
                    DocumentEntry::Element(root) => reader.load_definitions(root)?,
                };
                debug!("文档加载完成: {} 个定义", loaded);
            }
        }

        if registry.is_empty() {
            warn!("未加载任何 Bean 定义");
        }

        let eager = self.container_config.eager_singletons;
        let container =
            DefaultBeanContainer::new(registry, self.types, self.converters, self.container_config);

        if self.validation_enabled {
            if let Err(errors) = container.validate() {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                for message in &messages {
                    warn!("定义验证失败: {}", message);
                }
                return Err(InfrastructureError::BootstrapFailed {
                    message: format!("定义验证失败: {}", messages.join(", ")),
                });
            }
        }

        if eager {
            container.preinstantiate_singletons().await?;
        }

        info!("Bean 容器构建完成: {}", container.id());
        Ok(container)
    }
}

impl Default for BeanContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_exists(path: &Path) -> InfrastructureResult<&Path> {
    if path.exists() {
        Ok(path)
    } else {
        Err(InfrastructureError::BootstrapFailed {
            message: format!("配置文件不存在: {}", path.display()),
        })
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 过滤指令，未设置时优先读取 `RUST_LOG`
    pub filter: Option<String>,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            filter: None,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            filter: None,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            filter: None,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 构造过滤器
    pub fn env_filter(&self) -> InfrastructureResult<EnvFilter> {
        match &self.filter {
            Some(directives) => {
                EnvFilter::try_new(directives).map_err(|e| InfrastructureError::BootstrapFailed {
                    message: format!("日志过滤指令无效: {}", e),
                })
            }
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()))),
        }
    }

    /// 初始化日志系统
    pub fn initialize(&self) -> InfrastructureResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter()?)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
