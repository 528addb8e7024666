// Read Use Case

use std::io::{self, BufReader};
use std::path::Path;

use crate::domain::{join_lines, LineEnding, LineReader};
use crate::error::{Access, Result, TextError};
use crate::port::FileSystem;

/// Read `path` line by line and rejoin the lines with `newline`
///
/// No terminator follows the last line, whatever the source ended with.
pub fn execute(fs: &dyn FileSystem, path: &Path, newline: LineEnding) -> Result<String> {
    let to_error = |e: io::Error| TextError::from_io(Access::Read, path, e);

    let stream = fs.open_read(path).map_err(to_error)?;
    let lines = LineReader::new(BufReader::new(stream))
        .collect::<io::Result<Vec<_>>>()
        .map_err(to_error)?;

    Ok(join_lines(lines, newline))
}

/// Async twin of [`execute`]
pub async fn execute_async(
    fs: &dyn FileSystem,
    path: &Path,
    newline: LineEnding,
) -> Result<String> {
    let to_error = |e: io::Error| TextError::from_io(Access::Read, path, e);

    let stream = fs.open_read_async(path).await.map_err(to_error)?;
    let mut reader = LineReader::new(tokio::io::BufReader::new(stream));

    let mut lines = Vec::new();
    while let Some(line) = reader.next_line_async().await.map_err(to_error)? {
        lines.push(line);
    }
    Ok(join_lines(lines, newline))
}
