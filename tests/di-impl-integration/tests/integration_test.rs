//! Centralized integration tests for di-impl crate
//!
//! 从 TOML、JSON、YAML 文档加载定义，经由派生的访问器表装配 Bean。

use component_macros::Bean;
use config_abstractions::DocumentProvider;
use config_impl::{JsonDocumentProvider, TomlDocumentProvider, YamlDocumentProvider};
use di_abstractions::{BeanFactory, ContainerConfig};
use di_impl::{BeanTypeRegistry, ConverterRegistry, DefaultBeanContainer};
use infrastructure_common::{BeanError, BeanType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

static GATEWAY_CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

/// 支付网关
#[derive(Debug, Bean)]
#[bean(constructor = "new", methods(connect))]
pub struct PaymentGateway {
    endpoint: String,
    timeout_ms: i64,
    retry: bool,
    fee_rate: f64,
    #[bean(skip)]
    connected: bool,
}

impl PaymentGateway {
    pub fn new() -> Self {
        GATEWAY_CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(5));
        Self {
            endpoint: String::new(),
            timeout_ms: 0,
            retry: false,
            fee_rate: 0.0,
            connected: false,
        }
    }

    fn connect(&mut self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("未配置支付网关地址".to_string());
        }
        self.connected = true;
        Ok(())
    }
}

/// 订单仓储
#[derive(Debug, Default, Bean)]
pub struct OrderRepository {
    table: String,
    label: String,
}

/// 订单服务
#[derive(Debug, Default, Bean)]
#[bean(methods(init))]
pub struct OrderService {
    gateway: Option<Arc<PaymentGateway>>,
    repository: Option<Arc<OrderRepository>>,
    max_items: i32,
    #[bean(skip)]
    init_calls: usize,
}

impl OrderService {
    fn init(&mut self) {
        self.init_calls += 1;
    }
}

/// 购物车，原型作用域
#[derive(Debug, Default, Bean)]
pub struct ShoppingCart {
    repository: Option<Arc<OrderRepository>>,
    owner: String,
}

/// 链表节点，用于构造引用环
#[derive(Debug, Default, Bean)]
pub struct Node {
    next: Option<Arc<Node>>,
}

fn types() -> BeanTypeRegistry {
    let mut types = BeanTypeRegistry::new();
    types
        .register::<PaymentGateway>()
        .register::<OrderRepository>()
        .register::<OrderService>()
        .register::<ShoppingCart>()
        .register::<Node>()
        .register_alias("shop.PaymentGateway", PaymentGateway::type_info().path)
        .register_alias("shop.OrderRepository", OrderRepository::type_info().path)
        .register_alias("shop.OrderService", OrderService::type_info().path)
        .register_alias("shop.ShoppingCart", ShoppingCart::type_info().path)
        .register_alias("shop.Node", Node::type_info().path);
    types
}

fn container_from(provider: &dyn DocumentProvider) -> DefaultBeanContainer {
    let root = provider.load().unwrap();
    DefaultBeanContainer::load(&root, types()).unwrap()
}

const SHOP_TOML: &str = r#"
[[description]]
text = "订单模块"

[[bean]]
id = "gateway"
class = "shop.PaymentGateway"
init-method = "connect"

  [[bean.property]]
  name = "endpoint"
  value = "https://pay.example.test"

  [[bean.property]]
  name = "timeoutMs"
  value = "1500"
  type = "long"

  [[bean.property]]
  name = "retry"
  value = "true"
  type = "boolean"

  [[bean.property]]
  name = "feeRate"
  value = "0.025"
  type = "double"

[[bean]]
class = "shop.OrderRepository"
scope = "singleton"

  [[bean.property]]
  name = "table"
  value = "orders"

  [[bean.property]]
  name = "label"
  value = ""

[[bean]]
id = "orderService"
class = "shop.OrderService"
init-method = "init"

  [[bean.property]]
  name = "gateway"
  ref = "gateway"

  [[bean.property]]
  name = "repository"
  ref = "OrderRepository"

  [[bean.property]]
  name = "maxItems"
  value = "20"
  type = "int"

[[bean]]
id = "cart"
class = "shop.ShoppingCart"
scope = "prototype"

  [[bean.property]]
  name = "repository"
  ref = "OrderRepository"

  [[bean.property]]
  name = "owner"
  value = "guest"
"#;

#[tokio::test]
async fn test_toml_document_wiring() -> anyhow::Result<()> {
    let container = container_from(&TomlDocumentProvider::from_content(SHOP_TOML));

    let service = container.get_bean_as::<OrderService>("orderService").await?;
    let gateway = container.get_bean_as::<PaymentGateway>("gateway").await?;
    let repository = container
        .get_bean_as::<OrderRepository>("OrderRepository")
        .await?;

    assert!(Arc::ptr_eq(service.gateway.as_ref().unwrap(), &gateway));
    assert!(Arc::ptr_eq(service.repository.as_ref().unwrap(), &repository));
    assert_eq!(service.max_items, 20);
    assert_eq!(service.init_calls, 1);

    assert!(gateway.connected);
    assert_eq!(gateway.endpoint, "https://pay.example.test");
    assert_eq!(gateway.timeout_ms, 1500);
    assert!(gateway.retry);
    assert!((gateway.fee_rate - 0.025).abs() < f64::EPSILON);

    assert_eq!(repository.table, "orders");
    assert_eq!(repository.label, "");
    Ok(())
}

#[tokio::test]
async fn test_prototype_shares_singleton_dependency() -> anyhow::Result<()> {
    let container = container_from(&TomlDocumentProvider::from_content(SHOP_TOML));

    let first = container.get_bean_as::<ShoppingCart>("cart").await?;
    let second = container.get_bean_as::<ShoppingCart>("cart").await?;

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(
        first.repository.as_ref().unwrap(),
        second.repository.as_ref().unwrap()
    ));
    assert_eq!(first.owner, "guest");
    assert!(container.is_prototype("cart")?);
    assert!(container.is_singleton("orderService")?);

    let stats = container.stats();
    assert_eq!(stats.prototype_definitions, 1);
    assert_eq!(stats.singleton_definitions, 3);
    Ok(())
}

#[tokio::test]
async fn test_json_document() {
    let content = r#"{
        "bean": [
            { "id": "repo", "class": "shop.OrderRepository",
              "property": [ { "name": "table", "value": "archive" } ] },
            { "class": "shop.ShoppingCart", "scope": "prototype",
              "property": [
                  { "name": "repository", "ref": "repo" },
                  { "name": "owner", "value": "alice" }
              ] }
        ]
    }"#;
    let container = container_from(&JsonDocumentProvider::from_content(content));

    let cart = container
        .get_bean_as::<ShoppingCart>("ShoppingCart")
        .await
        .unwrap();
    assert_eq!(cart.owner, "alice");
    assert_eq!(cart.repository.as_ref().unwrap().table, "archive");
}

#[tokio::test]
async fn test_yaml_init_method_failures() {
    let content = r#"
bean:
  - id: unconfigured
    class: shop.PaymentGateway
    init-method: connect
  - id: unknownMethod
    class: shop.OrderRepository
    init-method: warmUp
"#;
    let container = container_from(&YamlDocumentProvider::from_content(content));

    let err = container.get_bean("unconfigured").await.unwrap_err();
    assert!(matches!(err, BeanError::Invocation { ref method, .. } if method == "connect"));

    let err = container.get_bean("unknownMethod").await.unwrap_err();
    assert!(matches!(err, BeanError::NoSuchMethod { ref method, .. } if method == "warmUp"));
}

#[tokio::test]
async fn test_reference_cycle_through_document() {
    let content = r#"
bean:
  - id: first
    class: shop.Node
    property:
      - name: next
        ref: second
  - id: second
    class: shop.Node
    property:
      - name: next
        ref: third
  - id: third
    class: shop.Node
    property:
      - name: next
        ref: first
"#;
    let container = container_from(&YamlDocumentProvider::from_content(content));

    let err = container.get_bean("second").await.unwrap_err();
    match err {
        BeanError::CircularReference { chain } => {
            assert_eq!(chain, "second -> third -> first -> second");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(container.stats().active_singletons, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_singleton_from_document() {
    let container = Arc::new(container_from(&TomlDocumentProvider::from_content(
        SHOP_TOML,
    )));
    let before = GATEWAY_CONSTRUCTIONS.load(Ordering::SeqCst);

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let container = container.clone();
            tokio::spawn(async move {
                let name = if i % 2 == 0 { "gateway" } else { "orderService" };
                container.get_bean(name).await.unwrap();
                container
                    .get_bean_as::<PaymentGateway>("gateway")
                    .await
                    .unwrap()
            })
        })
        .collect();

    let gateways: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert!(gateways.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
    assert_eq!(GATEWAY_CONSTRUCTIONS.load(Ordering::SeqCst) - before, 1);
}

#[tokio::test]
async fn test_untyped_and_mistyped_literals() {
    let content = r#"
bean:
  - id: untyped
    class: shop.OrderService
    property:
      - name: maxItems
        value: "20"
  - id: malformed
    class: shop.OrderService
    property:
      - name: maxItems
        value: twenty
        type: integer
"#;
    let container = container_from(&YamlDocumentProvider::from_content(content));

    let err = container.get_bean("untyped").await.unwrap_err();
    assert!(matches!(err, BeanError::Access { ref field, .. } if field == "maxItems"));

    let err = container.get_bean("malformed").await.unwrap_err();
    assert!(matches!(err, BeanError::Conversion { ref value, .. } if value == "twenty"));
}

#[tokio::test]
async fn test_load_errors() {
    let duplicate = r#"
bean:
  - class: shop.OrderRepository
  - id: OrderRepository
    class: shop.Node
"#;
    let root = YamlDocumentProvider::from_content(duplicate).load().unwrap();
    let err = DefaultBeanContainer::load(&root, types()).unwrap_err();
    assert!(err.is_configuration());

    let unknown_class = r#"{ "bean": [ { "id": "x", "class": "shop.Missing" } ] }"#;
    let root = JsonDocumentProvider::from_content(unknown_class)
        .load()
        .unwrap();
    assert!(DefaultBeanContainer::load(&root, types())
        .unwrap_err()
        .is_configuration());
}

#[tokio::test]
async fn test_depth_limit_from_config() {
    let content = r#"
bean:
  - id: a
    class: shop.Node
    property:
      - name: next
        ref: b
  - id: b
    class: shop.Node
    property:
      - name: next
        ref: c
  - id: c
    class: shop.Node
"#;
    let root = YamlDocumentProvider::from_content(content).load().unwrap();
    let config = ContainerConfig {
        max_resolution_depth: 2,
        ..ContainerConfig::default()
    };
    let container =
        DefaultBeanContainer::from_document(&root, types(), ConverterRegistry::new(), config)
            .unwrap();

    let err = container.get_bean("a").await.unwrap_err();
    assert!(matches!(
        err,
        BeanError::ResolutionDepthExceeded { max_depth: 2, .. }
    ));

    // 较浅的入口不受影响
    let node = container.get_bean_as::<Node>("b").await.unwrap();
    assert!(node.next.is_some());
}
