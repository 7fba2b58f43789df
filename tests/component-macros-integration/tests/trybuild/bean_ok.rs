use component_macros::Bean;
use infrastructure_common::{Bean, BeanType, ResolvedValue};

#[derive(Debug, Default, Bean)]
struct OkService {
    endpoint: String,
    retry_count: i32,
}

fn main() {
    let mut service = OkService::default();
    service
        .set_property("retryCount", ResolvedValue::converted("integer", 3i32))
        .unwrap();
    service
        .set_property("endpoint", ResolvedValue::Text("http://localhost".to_string()))
        .unwrap();
    assert_eq!(service.retry_count, 3);
    assert_eq!(service.endpoint, "http://localhost");
    assert!(OkService::constructor().is_some());
}
