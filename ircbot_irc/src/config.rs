use ircbot_config::{LoadFromEnv, Secret};

use crate::types::Registration;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct Config {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
    #[serde(default = "default_tls_port")]
    pub tls_port: u16,
    pub channel: String,
    pub nick: String,
    #[serde(default = "default_realname")]
    pub realname: String,
    #[serde(default)]
    pub password_required: bool,
    #[serde(default)]
    pub password: Secret<String>,
}

const fn default_port() -> u16 {
    6667
}

const fn default_tls_port() -> u16 {
    6697
}

fn default_realname() -> String {
    format!("ircbot {}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub const fn port(&self) -> u16 {
        if self.tls {
            self.tls_port
        } else {
            self.port
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port())
    }

    pub fn password(&self) -> Option<&str> {
        self.password_required.then_some(&**self.password)
    }

    pub fn registration(&self) -> Registration<'_> {
        Registration {
            nick: &self.nick,
            realname: &self.realname,
            password: self.password(),
        }
    }
}

impl LoadFromEnv for Config {
    fn apply_env(self) -> Self {
        ircbot_config::apply_env(
            self,
            &[("IRCBOT_PASSWORD", |this: &mut Self, v: String| {
                this.password = Secret(v);
                this.password_required = true;
            })],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: Config = ircbot_config::load_from_str(
            r##"
            host = "irc.example.net"
            channel = "#rust"
            nick = "ircbot"
            "##,
        )
        .unwrap();

        assert_eq!(config.address(), "irc.example.net:6667");
        assert_eq!(config.password(), None);
        assert!(config.realname.starts_with("ircbot "));
    }

    #[test]
    fn tls_uses_the_tls_port() {
        let config: Config = ircbot_config::load_from_str(
            r##"
            host = "irc.example.net"
            port = 6667
            tls = true
            tls_port = 7000
            channel = "#rust"
            nick = "ircbot"
            password_required = true
            password = "hunter2"
            "##,
        )
        .unwrap();

        assert_eq!(config.address(), "irc.example.net:7000");
        assert_eq!(config.password(), Some("hunter2"));
        assert!(!format!("{config:?}").contains("hunter2"));
    }

    #[test]
    fn password_is_ignored_unless_required() {
        let config: Config = ircbot_config::load_from_str(
            r##"
            host = "irc.example.net"
            channel = "#rust"
            nick = "ircbot"
            password = "hunter2"
            "##,
        )
        .unwrap();

        assert_eq!(config.registration().password, None);
    }
}
