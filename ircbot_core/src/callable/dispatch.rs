use std::{sync::Arc, time::Duration};

use super::{Lookup, Registry};
use crate::render::Response;

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    timeout: Duration,
}

impl Dispatcher {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(registry),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self, name: &str) -> bool {
        self.registry.validate(name)
    }

    // handlers run on their own task so a panic or a stall is contained, but
    // the caller still waits for the result before moving on
    pub async fn dispatch(&self, name: &str, arg: &str) -> Response {
        let handler = match self.registry.lookup(name) {
            Lookup::Found(handler) => Arc::clone(handler),
            Lookup::NotFound => {
                log::debug!("{name} is not a known command");
                return Response::Unknown;
            }
        };

        log::debug!("dispatching !{name} with {arg:?}");
        let mut task = tokio::spawn(handler.call(arg.to_string()));

        match tokio::time::timeout(self.timeout, &mut task).await {
            Ok(Ok(res)) => {
                if let Err(err) = &res {
                    log::warn!("!{name} failed: {err:#}");
                }
                res.into()
            }
            Ok(Err(err)) if err.is_panic() => {
                log::error!("!{name} panicked");
                Response::Problem(String::from("the command crashed"))
            }
            Ok(Err(..)) => Response::Problem(String::from("the command was cancelled")),
            Err(..) => {
                task.abort();
                log::warn!("!{name} timed out after {:?}", self.timeout);
                Response::Problem(String::from("the command took too long"))
            }
        }
    }
}
