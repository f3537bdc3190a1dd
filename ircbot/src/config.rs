use std::{path::Path, time::Duration};

use ircbot_config::LoadFromEnv;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Bot {
    #[serde(default = "Bot::default_timeout")]
    pub handler_timeout_secs: u64,
}

impl Bot {
    const fn default_timeout() -> u64 {
        10
    }

    pub const fn handler_timeout(&self) -> Duration {
        Duration::from_secs(self.handler_timeout_secs)
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self {
            handler_timeout_secs: Self::default_timeout(),
        }
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Config {
    pub irc: ircbot_irc::config::Config,
    #[serde(default)]
    pub bot: self::Bot,
    pub stock: crate::stock::Config,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let this: Self = ircbot_config::load_from_file(path)?;
        let this = this.apply_env();
        this.validate()?;
        Ok(this)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let irc = &self.irc;
        anyhow::ensure!(!irc.host.trim().is_empty(), "irc.host cannot be empty");
        anyhow::ensure!(
            !irc.nick.is_empty() && !irc.nick.contains(char::is_whitespace),
            "irc.nick must be a single word"
        );
        anyhow::ensure!(
            irc.channel.starts_with(['#', '&']) && !irc.channel.contains(char::is_whitespace),
            "irc.channel must look like #channel"
        );
        anyhow::ensure!(
            !irc.password_required || !irc.password.is_empty(),
            "irc.password is required but empty"
        );
        anyhow::ensure!(
            self.bot.handler_timeout_secs > 0,
            "bot.handler_timeout_secs must be greater than zero"
        );
        Ok(())
    }
}

impl LoadFromEnv for Config {
    fn apply_env(self) -> Self {
        Self {
            irc: self.irc.apply_env(),
            stock: self.stock.apply_env(),
            ..self
        }
    }
}
