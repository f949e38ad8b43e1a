use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Line-oriented terminal: prompts on `output`, answers from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub async fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        self.output.write_all(line.as_ref().as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Next input line without its terminator; `None` once input is exhausted.
    /// Bytes that are not UTF-8 become U+FFFD so a bad line is just bad input.
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print `label` without a newline and read the answer.
    /// Exhausted input reads as an empty answer.
    pub async fn prompt(&mut self, label: &str) -> io::Result<String> {
        self.prompt_opt(label).await.map(Option::unwrap_or_default)
    }

    pub async fn prompt_opt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;
        self.read_line().await
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
