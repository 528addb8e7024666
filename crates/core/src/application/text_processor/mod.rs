// TextProcessor - reads a source file into one string, writes a string out

pub mod read;
pub mod write;


use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::LineEnding;
use crate::error::Result;
use crate::port::{FileSystem, HostFileSystem};

/// Reads a source text file and writes a destination text file
///
/// Paths are not checked at construction; a bad path surfaces on the first
/// call that uses it. Every call opens and releases its own handle, so a
/// processor holds no open files between calls.
///
/// # Example
/// ```no_run
/// use textflow_core::TextProcessor;
///
/// let processor = TextProcessor::new("notes.txt", "notes.out.txt");
/// let content = processor.read()?;
/// processor.write(&content)?;
/// # Ok::<(), textflow_core::TextError>(())
/// ```
#[derive(Clone)]
pub struct TextProcessor {
    source_path: PathBuf,
    destination_path: PathBuf,
    filesystem: Arc<dyn FileSystem>,
    line_ending: LineEnding,
}

impl TextProcessor {
    /// Processor over the host filesystem
    pub fn new(source_path: impl Into<PathBuf>, destination_path: impl Into<PathBuf>) -> Self {
        Self::with_filesystem(source_path, destination_path, Arc::new(HostFileSystem))
    }

    /// Processor over an injected filesystem
    pub fn with_filesystem(
        source_path: impl Into<PathBuf>,
        destination_path: impl Into<PathBuf>,
        filesystem: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            destination_path: destination_path.into(),
            filesystem,
            line_ending: LineEnding::native(),
        }
    }

    /// Override the host line terminator used for joining and writing
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Read the source, rejoining its lines with the line terminator
    ///
    /// # Errors
    /// - TextError::NotFound if the source does not exist
    /// - TextError::AccessDenied if the source cannot be opened
    /// - TextError::Io on any failure while reading
    pub fn read(&self) -> Result<String> {
        read::execute(
            self.filesystem.as_ref(),
            &self.source_path,
            self.line_ending,
        )
    }

    /// Async twin of [`TextProcessor::read`]
    pub async fn read_async(&self) -> Result<String> {
        read::execute_async(
            self.filesystem.as_ref(),
            &self.source_path,
            self.line_ending,
        )
        .await
    }

    /// Overwrite the destination with `data`, verbatim
    ///
    /// # Errors
    /// - TextError::PathInvalid if the destination directory does not exist
    /// - TextError::AccessDenied if the destination cannot be opened for write
    /// - TextError::Io on any failure while writing; the destination may be
    ///   left partially written
    pub fn write(&self, data: &str) -> Result<()> {
        write::execute(
            self.filesystem.as_ref(),
            &self.destination_path,
            self.line_ending,
            data,
        )
    }

    /// Async twin of [`TextProcessor::write`]
    pub async fn write_async(&self, data: &str) -> Result<()> {
        write::execute_async(
            self.filesystem.as_ref(),
            &self.destination_path,
            self.line_ending,
            data,
        )
        .await
    }
}

impl fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextProcessor")
            .field("source_path", &self.source_path)
            .field("destination_path", &self.destination_path)
            .field("line_ending", &self.line_ending)
            .finish_non_exhaustive()
    }
}
