use component_macros::Bean;
use infrastructure_common::{Bean, BeanType};

#[derive(Bean)]
#[bean(constructor = "create", methods(start, check))]
struct Worker {
    #[bean(skip)]
    started: bool,
}

impl Worker {
    fn create() -> Self {
        Self { started: false }
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn check(&mut self) -> Result<(), std::io::Error> {
        Ok(())
    }
}

fn main() {
    let mut worker = (Worker::constructor().unwrap())();
    worker.invoke_method("start").unwrap();
    worker.invoke_method("check").unwrap();
    assert!(worker.started);
}
