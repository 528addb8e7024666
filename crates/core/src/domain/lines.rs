//! Line splitting and rejoining.
//!
//! A line ends at `\n`, `\r\n` or a lone `\r`. Terminators are stripped, and a
//! terminator at the very end of the input does not start another line, so
//! `"a\nb\n"` and `"a\r\nb"` both have the two lines `a` and `b`. A leading
//! UTF-8 byte-order mark is not part of the first line.

use std::io::{self, BufRead};
use std::mem;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::line_ending::LineEnding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Split in-memory text into lines
pub fn split_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let bytes = text.as_bytes();

    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Join lines with `ending` between them, never after the last one
pub fn join_lines<I, S>(lines: I, ending: LineEnding) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, line) in lines.into_iter().enumerate() {
        if i > 0 {
            out.push_str(ending.as_str());
        }
        out.push_str(line.as_ref());
    }
    out
}

/// Incremental terminator scanner shared by the sync and async readers
#[derive(Debug, Default)]
struct LineScanner {
    current: Vec<u8>,
    // A `\r` ended the last buffer; a `\n` at the start of the next one
    // belongs to that terminator.
    after_cr: bool,
    bom_checked: bool,
}

impl LineScanner {
    /// Scan one buffer. Returns the bytes consumed and the line completed, if any.
    fn scan(&mut self, buf: &[u8]) -> (usize, Option<Vec<u8>>) {
        let mut start = 0;
        if mem::take(&mut self.after_cr) && buf.first() == Some(&b'\n') {
            start = 1;
        }

        let rest = &buf[start..];
        match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(pos) => {
                self.current.extend_from_slice(&rest[..pos]);
                let mut consumed = start + pos + 1;
                if rest[pos] == b'\r' {
                    match buf.get(consumed) {
                        Some(b'\n') => consumed += 1,
                        Some(_) => {}
                        None => self.after_cr = true,
                    }
                }
                (consumed, Some(self.take_line()))
            }
            None => {
                self.current.extend_from_slice(rest);
                (buf.len(), None)
            }
        }
    }

    /// End of input: the unterminated tail, if it holds anything
    fn finish(&mut self) -> Option<Vec<u8>> {
        let line = self.take_line();
        (!line.is_empty()).then_some(line)
    }

    fn take_line(&mut self) -> Vec<u8> {
        let mut line = mem::take(&mut self.current);
        if !mem::replace(&mut self.bom_checked, true) && line.starts_with(UTF8_BOM) {
            line.drain(..UTF8_BOM.len());
        }
        line
    }
}

// Invalid sequences become U+FFFD. Terminators are ASCII, so a multi-byte
// character is never split across two lines.
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Reads UTF-8 lines from a buffered byte stream
///
/// Works over blocking `BufRead` sources through [`LineReader::next_line`]
/// (or as an `Iterator`) and over tokio `AsyncBufRead` sources through
/// [`LineReader::next_line_async`]. Both produce the same line sequence.
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    scanner: LineScanner,
    done: bool,
}

impl<R> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            scanner: LineScanner::default(),
            done: false,
        }
    }
}

impl<R: BufRead> LineReader<R> {
    /// Next line, or `None` once the source is exhausted
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.done {
            return Ok(None);
        }
        loop {
            let buf = match BufRead::fill_buf(&mut self.reader) {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                self.done = true;
                return Ok(self.scanner.finish().map(decode));
            }
            let (consumed, line) = self.scanner.scan(buf);
            BufRead::consume(&mut self.reader, consumed);
            if let Some(line) = line {
                return Ok(Some(decode(line)));
            }
        }
    }
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Async twin of [`LineReader::next_line`]
    pub async fn next_line_async(&mut self) -> io::Result<Option<String>> {
        if self.done {
            return Ok(None);
        }
        loop {
            let buf = AsyncBufReadExt::fill_buf(&mut self.reader).await?;
            if buf.is_empty() {
                self.done = true;
                return Ok(self.scanner.finish().map(decode));
            }
            let (consumed, line) = self.scanner.scan(buf);
            AsyncBufReadExt::consume(&mut self.reader, consumed);
            if let Some(line) = line {
                return Ok(Some(decode(line)));
            }
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
