use ircbot_core::prelude::Dispatcher;

pub mod config;

mod bot;
mod command;
mod connection;
mod framer;
mod message;
mod parser;
mod tls;
mod types;

pub use bot::{Bot, INVALID_COMMAND};
pub use command::{recognize, ParsedCommand, PREFIX};
pub use connection::{BoxedTransport, Connection, Transport};
pub use framer::{LineFramer, MAX_PENDING};
pub use message::{Message, Privmsg, Sender};
pub use parser::parse;
pub use types::{Registration, Status};

pub async fn create_bot(config: &config::Config, dispatcher: Dispatcher) -> anyhow::Result<()> {
    log::info!(
        "connecting to {} (with name {})",
        config.address(),
        config.nick
    );
    let mut conn = Connection::connect(config).await?;
    conn.register(config.registration()).await?;
    log::info!("connected");

    let mut bot = Bot::new(conn, dispatcher, &config.channel);
    log::info!("joining {}", config.channel);
    bot.join().await?;

    log::info!("starting the irc bot");
    bot.start().await
}
