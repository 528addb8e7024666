// Write Use Case

use std::io;
use std::path::Path;

use crate::application::text_writer::{AsyncTextWriter, TextWriter};
use crate::domain::LineEnding;
use crate::error::{Access, Result, TextError};
use crate::port::FileSystem;

/// Truncate `path` and write `data` verbatim, flushing before returning
///
/// A failure after the open leaves whatever was written so far in place.
pub fn execute(fs: &dyn FileSystem, path: &Path, newline: LineEnding, data: &str) -> Result<()> {
    let to_error = |e: io::Error| TextError::from_io(Access::Write, path, e);

    let stream = fs.open_write(path).map_err(to_error)?;
    let mut writer = TextWriter::new(stream, newline);
    writer.write_str(data).map_err(to_error)?;
    writer.flush().map_err(to_error)
}

/// Async twin of [`execute`]
pub async fn execute_async(
    fs: &dyn FileSystem,
    path: &Path,
    newline: LineEnding,
    data: &str,
) -> Result<()> {
    let to_error = |e: io::Error| TextError::from_io(Access::Write, path, e);

    let stream = fs.open_write_async(path).await.map_err(to_error)?;
    let mut writer = AsyncTextWriter::new(stream, newline);
    writer.write_str(data).await.map_err(to_error)?;
    writer.flush().await.map_err(to_error)
}
