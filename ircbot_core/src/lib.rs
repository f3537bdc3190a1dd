use std::{future::Future, pin::Pin};

pub mod callable;
pub mod render;

type BoxedFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

pub mod prelude {
    pub use std::sync::Arc;

    pub use crate::callable::{
        self, Command, Dispatcher, Handler, Lookup, Registry, SharedHandler,
    };
    pub use crate::render::Response;
}

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
