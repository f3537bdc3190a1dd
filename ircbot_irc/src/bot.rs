use ircbot_core::prelude::Dispatcher;
use tokio::io::{AsyncRead, AsyncWrite};

use super::{command, parser, Connection, Message, Privmsg, Status};

/// Reply to a command name that isn't registered.
pub const INVALID_COMMAND: &str = "Invalid command";

pub struct Bot<R, W> {
    conn: Connection<R, W>,
    dispatcher: Dispatcher,
    channel: String,
}

impl<R, W> Bot<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(conn: Connection<R, W>, dispatcher: Dispatcher, channel: impl ToString) -> Self {
        Self {
            conn,
            dispatcher,
            channel: channel.to_string(),
        }
    }

    pub const fn status(&self) -> Status {
        self.conn.status()
    }

    pub async fn join(&mut self) -> anyhow::Result<()> {
        self.conn.join(&self.channel).await
    }

    /// Only returns when the connection fails.
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.conn.listen()?;
        loop {
            let line = self.conn.read_line().await?;
            self.handle(&line).await?;
        }
    }

    async fn handle(&mut self, line: &str) -> anyhow::Result<()> {
        match parser::parse(line) {
            Message::Ping { token } => {
                log::debug!("got a ping ({token}), replying with a pong");
                self.conn.pong(token).await
            }
            Message::Chat(pm) => self.dispatch(pm).await,
            Message::Unrecognized => Ok(()),
        }
    }

    async fn dispatch(&mut self, pm: Privmsg<'_>) -> anyhow::Result<()> {
        log::debug!("[{}] {}: {}", pm.target, pm.sender.nick, pm.body);

        if pm.body.is_empty() {
            return Ok(());
        }

        let Some(cmd) = command::recognize(pm.body) else {
            return Ok(());
        };

        let target = reply_target(&self.channel, &pm);

        if !self.dispatcher.validate(cmd.name) {
            log::debug!("{} tried an unknown command: !{}", pm.sender.nick, cmd.name);
            return self.conn.privmsg(target, INVALID_COMMAND).await;
        }

        let Some(arg) = cmd.arg else {
            log::debug!("!{} had no argument, ignoring it", cmd.name);
            return Ok(());
        };

        let resp = self.dispatcher.dispatch(cmd.name, arg).await;
        self.conn.privmsg(target, &resp.to_string()).await
    }
}

fn reply_target<'a>(channel: &'a str, pm: &Privmsg<'a>) -> &'a str {
    if pm.target.eq_ignore_ascii_case(channel) {
        channel
    } else {
        pm.sender.nick
    }
}

#[cfg(test)]
mod tests {
    use ircbot_core::prelude::{Command, Registry};
    use tokio::io::{ReadHalf, WriteHalf};
    use tokio_test::io::{Builder, Mock};

    use super::*;

    async fn stock(arg: String) -> anyhow::Result<String> {
        anyhow::ensure!(!arg.is_empty(), "a symbol is required");
        Ok(format!("{arg}: 123.45"))
    }

    async fn blank(_arg: String) -> anyhow::Result<String> {
        Ok(String::new())
    }

    fn script() -> Builder {
        let mut builder = Builder::new();
        builder.write(b"JOIN #rust\r\n");
        builder
    }

    async fn joined(mock: Mock) -> Bot<ReadHalf<Mock>, WriteHalf<Mock>> {
        let (read, write) = tokio::io::split(mock);
        let registry = Registry::new()
            .register(Command::new("stock"), stock)
            .register(Command::new("blank"), blank);

        let mut bot = Bot::new(Connection::new(read, write), Dispatcher::new(registry), "#rust");
        bot.join().await.unwrap();
        assert_eq!(bot.status(), Status::Joined);
        bot
    }

    // the mock has to be built before this is called: a scripted read error
    // can only be handed out once the builder is gone
    async fn run(mock: Mock) -> anyhow::Error {
        let mut bot = joined(mock).await;
        let err = bot.start().await.unwrap_err();
        assert_eq!(bot.status(), Status::Disconnected);
        err
    }

    #[tokio::test]
    async fn ping_is_answered_before_the_next_line() {
        let mock = script()
            .read(b"PING :abc123\r\n")
            .write(b"PONG :abc123\r\n")
            .read(b":alice!al@host PRIVMSG #rust :!stock AAPL\r\n")
            .write(b"PRIVMSG #rust :AAPL: 123.45\r\n")
            .build();
        let err = run(mock).await;
        assert_eq!(err.to_string(), "connection closed");
    }

    #[tokio::test]
    async fn ping_keeps_the_session_listening() {
        let mock = script().write(b"PONG :abc123\r\n").build();
        let mut bot = joined(mock).await;
        bot.conn.listen().unwrap();

        bot.handle("PING :abc123").await.unwrap();
        assert_eq!(bot.status(), Status::Listening);
    }

    #[tokio::test]
    async fn channel_command_replies_to_the_channel() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG #rust :!stock AAPL\r\n")
            .write(b"PRIVMSG #rust :AAPL: 123.45\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn channel_match_ignores_ascii_case() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG #Rust :!stock AAPL\r\n")
            .write(b"PRIVMSG #rust :AAPL: 123.45\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn private_command_replies_to_the_sender() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG ircbot :!stock MSFT\r\n")
            .write(b"PRIVMSG alice :MSFT: 123.45\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn unknown_command_gets_an_error_reply() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG #rust :!quote AAPL\r\n")
            .write(b"PRIVMSG #rust :Invalid command\r\n")
            .read(b":alice!al@host PRIVMSG ircbot :!quote\r\n")
            .write(b"PRIVMSG alice :Invalid command\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn command_without_argument_is_ignored() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG #rust :!stock\r\n")
            .read(b":alice!al@host PRIVMSG #rust :!stock AAPL\r\n")
            .write(b"PRIVMSG #rust :AAPL: 123.45\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn empty_argument_is_still_dispatched() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG #rust :!stock \r\n")
            .write(b"PRIVMSG #rust :a problem occurred: a symbol is required\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn empty_result_is_still_sent() {
        let mock = script()
            .read(b":alice!al@host PRIVMSG #rust :!blank AAPL\r\n")
            .write(b"PRIVMSG #rust :\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn everything_else_is_ignored() {
        let mock = script()
            .read(b":irc.example.net 001 ircbot :Welcome\r\n")
            .read(b":alice!al@host PRIVMSG #rust :hello world\r\n")
            .read(b":alice!al@host PRIVMSG #rust :\r\n")
            .read(b":alice!al@host NOTICE #rust :!stock AAPL\r\n")
            .read(b":alice!al@host PRIVMSG #rust :!stock1 AAPL\r\n")
            .read(b"PING :again\r\n")
            .write(b"PONG :again\r\n")
            .build();
        run(mock).await;
    }

    #[tokio::test]
    async fn read_fault_ends_the_session() {
        let mock = script()
            .read(b"PING :abc123\r\n")
            .write(b"PONG :abc123\r\n")
            .read_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            ))
            .build();
        let err = run(mock).await;
        assert_eq!(err.to_string(), "cannot read from the connection");
    }

    #[test]
    fn reply_targets() {
        let Message::Chat(pm) = parser::parse(":alice!al@host PRIVMSG #rust :hi") else {
            unreachable!()
        };
        insta::assert_snapshot!(reply_target("#rust", &pm), @"#rust");

        let Message::Chat(pm) = parser::parse(":alice!al@host PRIVMSG ircbot :hi") else {
            unreachable!()
        };
        insta::assert_snapshot!(reply_target("#rust", &pm), @"alice");

        let Message::Chat(pm) = parser::parse(":alice!al@host PRIVMSG #other :hi") else {
            unreachable!()
        };
        insta::assert_snapshot!(reply_target("#rust", &pm), @"alice");
    }
}
