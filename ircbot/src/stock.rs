use std::sync::Arc;

use anyhow::Context;
use ircbot_config::{LoadFromEnv, Secret};
use ircbot_core::prelude::{Command, Registry};
use serde_json::Value;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Config {
    pub key: Secret<String>,
    pub url: String,
}

impl LoadFromEnv for Config {
    fn apply_env(self) -> Self {
        ircbot_config::apply_env(
            self,
            &[("IRCBOT_STOCK_KEY", |this: &mut Self, v: String| {
                this.key = Secret(v)
            })],
        )
    }
}

struct StockClient {
    client: reqwest::Client,
    key: Secret<String>,
    template: String,
}

impl StockClient {
    fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(ircbot_core::USER_AGENT)
            .build()?;

        let this = Self {
            client,
            key: config.key.clone(),
            template: config.url.clone(),
        };
        // catch a broken template at startup rather than on the first lookup
        this.url_for("TEST")?;
        Ok(this)
    }

    fn url_for(&self, symbol: &str) -> anyhow::Result<url::Url> {
        let url = if self.template.contains("{key}") || self.template.contains("{symbol}") {
            self.template
                .replace("{key}", &self.key)
                .replace("{symbol}", symbol)
        } else {
            self.template
                .replacen("{}", &self.key, 1)
                .replacen("{}", symbol, 1)
        };
        url::Url::parse(&url).map_err(|err| anyhow::anyhow!("invalid stock url template: {err}"))
    }

    async fn quote(&self, arg: &str) -> anyhow::Result<String> {
        let symbol = normalize_symbol(arg)?;
        log::debug!("looking up quote for {symbol}");

        let value = self
            .fetch(self.url_for(&symbol)?)
            .await
            .map_err(|err| anyhow::anyhow!("cannot look up {symbol}: {}", err.without_url()))?;
        log::trace!("quote for {symbol}: {value}");

        format_quote(&symbol, &value)
    }

    async fn fetch(&self, url: url::Url) -> reqwest::Result<Value> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

pub struct Stock;

impl Stock {
    pub fn bind(registry: Registry, config: &Config) -> anyhow::Result<Registry> {
        let client = StockClient::new(config).map(Arc::new)?;
        let handler = move |arg: String| {
            let client = Arc::clone(&client);
            async move { client.quote(&arg).await }
        };

        let cmd = Command::new("stock")
            .usage("<symbol>")
            .help("looks up the latest quote for a stock symbol");
        Ok(registry.register(cmd, handler))
    }
}

fn normalize_symbol(arg: &str) -> anyhow::Result<String> {
    let symbol = arg.trim();
    anyhow::ensure!(!symbol.is_empty(), "a symbol is required: !stock <symbol>");
    anyhow::ensure!(
        symbol.len() <= 16
            && symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^')),
        "'{symbol}' is not a valid symbol"
    );
    Ok(symbol.to_ascii_uppercase())
}

fn format_quote(symbol: &str, value: &Value) -> anyhow::Result<String> {
    if let Some(msg) = ["Error Message", "Note", "Information"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
    {
        anyhow::bail!("{msg}")
    }

    let quote = match value.get("Global Quote") {
        Some(Value::Object(quote)) if quote.is_empty() => {
            anyhow::bail!("no quote found for {symbol}")
        }
        Some(Value::Object(quote)) => quote,
        _ => return Ok(value.to_string()),
    };

    let field = |suffix: &str| {
        quote
            .iter()
            .find(|(key, _)| key.ends_with(suffix))
            .and_then(|(_, val)| val.as_str())
    };

    let price = field("price").with_context(|| format!("the quote for {symbol} had no price"))?;
    let name = field("symbol").unwrap_or(symbol);

    Ok(match (field("change"), field("change percent")) {
        (Some(change), Some(percent)) => format!("{name}: {price} ({change}, {percent})"),
        _ => format!("{name}: {price}"),
    })
}
