//! Centralized integration tests for component-macros crate
//!
//! 派生的访问器表经由容器完成字段填充和初始化。

use component_macros::Bean;
use config_abstractions::ConfigElement;
use di_abstractions::BeanFactory;
use di_impl::{BeanTypeRegistry, DefaultBeanContainer};
use infrastructure_common::{BeanError, BeanType};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static INIT_CALLS: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Default, Bean)]
pub struct ConnectionPool {
    url: String,
    max_size: i32,
    validate_on_borrow: bool,
}

#[derive(Debug, Default, Bean)]
#[bean(methods(init))]
pub struct AccountRepository {
    pool: Option<Arc<ConnectionPool>>,
    table: String,
    #[bean(skip)]
    ready: bool,
}

impl AccountRepository {
    fn init(&mut self) -> Result<(), String> {
        INIT_CALLS.fetch_add(1, Ordering::SeqCst);
        if self.pool.is_none() {
            return Err("连接池未注入".to_string());
        }
        self.ready = true;
        Ok(())
    }
}

#[derive(Bean)]
#[bean(abstract)]
pub struct BaseRepository {
    #[allow(dead_code)]
    table: String,
}

fn types() -> BeanTypeRegistry {
    let mut types = BeanTypeRegistry::new();
    types
        .register::<ConnectionPool>()
        .register::<AccountRepository>()
        .register::<BaseRepository>()
        .register_alias("ConnectionPool", std::any::type_name::<ConnectionPool>())
        .register_alias("AccountRepository", std::any::type_name::<AccountRepository>())
        .register_alias("BaseRepository", std::any::type_name::<BaseRepository>());
    types
}

fn property(name: &str) -> ConfigElement {
    ConfigElement::new("property").with_attribute("name", name)
}

fn document() -> ConfigElement {
    ConfigElement::new("beans")
        .with_child(
            ConfigElement::new("bean")
                .with_attribute("class", "ConnectionPool")
                .with_child(property("url").with_attribute("value", "postgres://localhost/bank"))
                .with_child(
                    property("maxSize")
                        .with_attribute("value", "16")
                        .with_attribute("type", "int"),
                )
                .with_child(
                    property("validate_on_borrow")
                        .with_attribute("value", "true")
                        .with_attribute("type", "boolean"),
                ),
        )
        .with_child(
            ConfigElement::new("bean")
                .with_attribute("id", "accounts")
                .with_attribute("class", "AccountRepository")
                .with_attribute("init-method", "init")
                .with_child(property("pool").with_attribute("ref", "ConnectionPool"))
                .with_child(property("table").with_attribute("value", "account")),
        )
}

#[tokio::test]
async fn test_derived_beans_through_container() {
    let container = DefaultBeanContainer::load(&document(), types()).unwrap();

    let repository = container
        .get_bean_as::<AccountRepository>("accounts")
        .await
        .unwrap();
    let pool = container
        .get_bean_as::<ConnectionPool>("ConnectionPool")
        .await
        .unwrap();

    assert!(repository.ready);
    assert_eq!(repository.table, "account");
    assert!(Arc::ptr_eq(repository.pool.as_ref().unwrap(), &pool));
    assert_eq!(pool.url, "postgres://localhost/bank");
    assert_eq!(pool.max_size, 16);
    assert!(pool.validate_on_borrow);

    container.get_bean("accounts").await.unwrap();
    assert_eq!(INIT_CALLS.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_abstract_type_is_instantiation_error() {
    let root = ConfigElement::new("beans")
        .with_child(ConfigElement::new("bean").with_attribute("class", "BaseRepository"));
    let container = DefaultBeanContainer::load(&root, types()).unwrap();

    assert!(BaseRepository::constructor().is_none());
    let err = container.get_bean("BaseRepository").await.unwrap_err();
    assert!(matches!(err, BeanError::Instantiation { .. }));
}
