// Buffered text writers with a configured line terminator

use std::io::{self, BufWriter, Write};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::domain::LineEnding;

/// Blocking text writer
///
/// The terminator is fixed at construction, so it is in place before any
/// byte reaches the sink. `write_str` never translates terminators; only
/// `write_line` emits the configured one.
#[derive(Debug)]
pub struct TextWriter<W: Write> {
    inner: BufWriter<W>,
    newline: LineEnding,
}

impl<W: Write> TextWriter<W> {
    pub fn new(inner: W, newline: LineEnding) -> Self {
        Self {
            inner: BufWriter::new(inner),
            newline,
        }
    }

    pub fn newline(&self) -> LineEnding {
        self.newline
    }

    /// Write `text` verbatim
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())
    }

    /// Write `text` followed by the configured terminator
    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_str(text)?;
        self.write_str(self.newline.as_str())
    }

    /// Push all buffered output to the sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Non-blocking twin of [`TextWriter`]
#[derive(Debug)]
pub struct AsyncTextWriter<W: AsyncWrite + Unpin> {
    inner: tokio::io::BufWriter<W>,
    newline: LineEnding,
}

impl<W: AsyncWrite + Unpin> AsyncTextWriter<W> {
    pub fn new(inner: W, newline: LineEnding) -> Self {
        Self {
            inner: tokio::io::BufWriter::new(inner),
            newline,
        }
    }

    pub fn newline(&self) -> LineEnding {
        self.newline
    }

    pub async fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes()).await
    }

    pub async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_str(text).await?;
        self.inner.write_all(self.newline.as_str().as_bytes()).await
    }

    pub async fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_str_is_verbatim() {
        let mut sink = Vec::new();
        let mut writer = TextWriter::new(&mut sink, LineEnding::CrLf);
        writer.write_str("a\nb\rc").unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(sink, b"a\nb\rc");
    }

    #[test]
    fn test_write_line_uses_configured_newline() {
        let mut sink = Vec::new();
        let mut writer = TextWriter::new(&mut sink, LineEnding::CrLf);
        assert_eq!(writer.newline(), LineEnding::CrLf);
        writer.write_line("first").unwrap();
        writer.write_str("second").unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(sink, b"first\r\nsecond");
    }

    #[test]
    fn test_flush_pushes_to_sink() {
        let mut sink = Vec::new();
        {
            let mut writer = TextWriter::new(&mut sink, LineEnding::Lf);
            writer.write_str("buffered").unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(sink, b"buffered");
    }

    #[tokio::test]
    async fn test_async_writer() {
        let mut sink = Vec::new();
        let mut writer = AsyncTextWriter::new(&mut sink, LineEnding::Cr);
        writer.write_line("x").await.unwrap();
        writer.write_str("y\n").await.unwrap();
        writer.flush().await.unwrap();
        drop(writer);
        assert_eq!(sink, b"x\ry\n");
    }
}
