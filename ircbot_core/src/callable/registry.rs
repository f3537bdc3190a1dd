use std::{collections::BTreeMap, sync::Arc};

use super::{Command, Handler, SharedHandler};

struct Entry {
    command: Command,
    handler: SharedHandler,
}

#[derive(Default)]
pub struct Registry {
    map: BTreeMap<Arc<str>, Entry>,
}

pub enum Lookup<'a> {
    Found(&'a SharedHandler),
    NotFound,
}

impl Lookup<'_> {
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(..))
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, command: Command, handler: impl Handler) -> Self {
        let name = Arc::clone(&command.command);
        let entry = Entry {
            command,
            handler: Arc::new(handler),
        };
        if let Some(..) = self.map.insert(Arc::clone(&name), entry) {
            log::warn!("replaced handler for: !{name}");
        }
        self
    }

    pub fn validate(&self, name: &str) -> bool {
        self.lookup(name).is_found()
    }

    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        self.map
            .get(name)
            .map_or(Lookup::NotFound, |entry| Lookup::Found(&entry.handler))
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.map.values().map(|entry| &entry.command)
    }
}
