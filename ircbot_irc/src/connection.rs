use anyhow::Context;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf},
    net::TcpStream,
};

use crate::{
    config::Config,
    framer::LineFramer,
    types::{Registration, Status},
};

// including the trailing \r\n
const MAX_LINE_LEN: usize = 512;

pub trait Transport: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T> Transport for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

pub type BoxedTransport = Box<dyn Transport>;

struct Io<R, W> {
    lines: LineFramer<R>,
    writer: W,
}

pub struct Connection<R = ReadHalf<BoxedTransport>, W = WriteHalf<BoxedTransport>> {
    io: Option<Io<R, W>>,
    status: Status,
}

impl Connection {
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let mut this = Self {
            io: None,
            status: Status::Connecting,
        };

        let addr = config.address();
        log::debug!("connecting to {addr} (tls: {})", config.tls);

        match Self::open(config).await {
            Ok(transport) => {
                let (read, write) = tokio::io::split(transport);
                this.attach(read, write);
                Ok(this)
            }
            Err(err) => {
                this.teardown();
                Err(err.context(format!("cannot connect to {addr}")))
            }
        }
    }

    async fn open(config: &Config) -> anyhow::Result<BoxedTransport> {
        let stream = TcpStream::connect((&*config.host, config.port())).await?;
        if !config.tls {
            return Ok(Box::new(stream));
        }
        let stream = crate::tls::wrap(&config.host, stream).await?;
        Ok(Box::new(stream))
    }
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        let mut this = Self {
            io: None,
            status: Status::Connecting,
        };
        this.attach(reader, writer);
        this
    }

    pub const fn status(&self) -> Status {
        self.status
    }

    pub async fn register(&mut self, reg: Registration<'_>) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.status == Status::Registering,
            "cannot register while {:?}",
            self.status
        );

        let Registration {
            nick,
            realname,
            password,
        } = reg;

        if let Some(pass) = password {
            self.write_line(&format!("PASS {pass}"), true).await?;
        }
        self.write_line(&format!("NICK {nick}"), false).await?;
        self.write_line(&format!("USER {nick} {nick} {nick} :{realname}"), false)
            .await
    }

    pub async fn join(&mut self, channel: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            matches!(self.status, Status::Registering | Status::Joined),
            "cannot join while {:?}",
            self.status
        );
        self.write_line(&format!("JOIN {channel}"), false).await?;
        self.status = Status::Joined;
        Ok(())
    }

    pub fn listen(&mut self) -> anyhow::Result<()> {
        anyhow::ensure!(
            matches!(self.status, Status::Joined | Status::Listening),
            "cannot listen while {:?}",
            self.status
        );
        self.status = Status::Listening;
        Ok(())
    }

    pub async fn pong(&mut self, token: &str) -> anyhow::Result<()> {
        self.write_line(&format!("PONG :{token}"), false).await
    }

    pub async fn privmsg(&mut self, target: &str, data: &str) -> anyhow::Result<()> {
        let head = format!("PRIVMSG {target} :");
        let room = MAX_LINE_LEN.saturating_sub(head.len() + 2);
        self.write_line(&format!("{head}{}", truncate(data, room)), false)
            .await
    }

    pub async fn send_line(&mut self, line: &str) -> anyhow::Result<()> {
        self.write_line(line, false).await
    }

    pub async fn read_line(&mut self) -> anyhow::Result<String> {
        let res = match self.io_mut()?.lines.next_line().await {
            Ok(Some(line)) => {
                log::trace!("<- {}", line.escape_debug());
                Ok(line)
            }
            Ok(None) => Err(anyhow::anyhow!("connection closed")),
            Err(err) => Err(err.context("cannot read from the connection")),
        };
        self.check(res)
    }

    pub fn into_inner(self) -> Option<(R, W)> {
        self.io
            .map(|Io { lines, writer }| (lines.into_inner(), writer))
    }

    async fn write_line(&mut self, line: &str, secret: bool) -> anyhow::Result<()> {
        let line = sanitize(line);
        if secret {
            let (command, _) = line.split_once(' ').unwrap_or((&line, ""));
            log::trace!("-> {command} <redacted>");
        } else {
            log::trace!("-> {}", line.escape_debug());
        }

        let mut data = String::with_capacity(line.len() + 2);
        data.push_str(&line);
        data.push_str("\r\n");

        let writer = &mut self.io_mut()?.writer;
        let res = match writer.write_all(data.as_bytes()).await {
            Ok(()) => writer.flush().await,
            Err(err) => Err(err),
        };
        let res = res.with_context(|| "cannot write to the connection");
        self.check(res)
    }

    fn io_mut(&mut self) -> anyhow::Result<&mut Io<R, W>> {
        self.io.as_mut().with_context(|| "not connected")
    }

    fn check<T>(&mut self, res: anyhow::Result<T>) -> anyhow::Result<T> {
        if res.is_err() {
            self.teardown();
        }
        res
    }

    fn attach(&mut self, reader: R, writer: W) {
        self.io = Some(Io {
            lines: LineFramer::new(reader),
            writer,
        });
        self.status = Status::Registering;
    }

    fn teardown(&mut self) {
        if self.io.take().is_some() {
            log::debug!("dropping the connection (was {:?})", self.status);
        }
        self.status = Status::Disconnected;
    }
}

fn sanitize(line: &str) -> std::borrow::Cow<'_, str> {
    if line.contains(['\r', '\n']) {
        line.replace(['\r', '\n'], " ").into()
    } else {
        line.into()
    }
}

fn truncate(data: &str, max: usize) -> &str {
    if data.len() <= max {
        return data;
    }
    let mut end = max;
    while !data.is_char_boundary(end) {
        end -= 1;
    }
    &data[..end]
}
