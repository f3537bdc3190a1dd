use std::{future::Future, sync::Arc};

use crate::BoxedFuture;

mod command;
mod dispatch;
mod registry;

pub use command::Command;
pub use dispatch::Dispatcher;
pub use registry::{Lookup, Registry};

pub type SharedHandler = Arc<dyn Handler>;

pub trait Handler
where
    Self: Send + Sync + 'static,
{
    fn call(&self, arg: String) -> BoxedFuture<'static, anyhow::Result<String>>;
}

impl<F> Handler for Arc<F>
where
    F: Handler + ?Sized,
{
    fn call(&self, arg: String) -> BoxedFuture<'static, anyhow::Result<String>> {
        (**self).call(arg)
    }
}

impl<F, Fut> Handler for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<String>> + Send + 'static,
{
    fn call(&self, arg: String) -> BoxedFuture<'static, anyhow::Result<String>> {
        Box::pin((self)(arg))
    }
}
