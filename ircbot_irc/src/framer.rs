use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Longest line the other side may send, terminator included.
pub const MAX_PENDING: usize = 8 * 1024;

pub struct LineFramer<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R> LineFramer<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            buf: Vec::new(),
        }
    }

    /// Returns the next complete line with its terminator stripped, or `None`
    /// once the other side has closed the connection.
    ///
    /// A line longer than [`MAX_PENDING`] is an error.
    pub async fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        self.buf.clear();
        let n = (&mut self.reader)
            .take(MAX_PENDING as u64)
            .read_until(b'\n', &mut self.buf)
            .await?;

        if n == 0 {
            return Ok(None);
        }

        match self.buf.last() {
            Some(b'\n') => {
                self.buf.pop();
                if self.buf.last() == Some(&b'\r') {
                    self.buf.pop();
                }
            }
            _ if n >= MAX_PENDING => {
                anyhow::bail!("line exceeded {MAX_PENDING} bytes without a terminator")
            }
            _ => {
                log::debug!("dropping {n} bytes of a partial line");
                return Ok(None);
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}
