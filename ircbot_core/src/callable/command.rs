use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Command {
    pub command: Arc<str>,
    pub usage: Option<Arc<str>>,
    pub description: Option<Arc<str>>,
}

impl Command {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.into(),
            usage: None,
            description: None,
        }
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage.get_or_insert_with(|| Arc::from(usage));
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.description.get_or_insert_with(|| Arc::from(help));
        self
    }

    pub fn name(&self) -> &str {
        &self.command
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!{}", self.command)?;
        if let Some(usage) = &self.usage {
            write!(f, " {usage}")?;
        }
        if let Some(desc) = &self.description {
            write!(f, " | {desc}")?;
        }
        Ok(())
    }
}
