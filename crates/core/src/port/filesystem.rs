// Filesystem Port (for substituting real and in-memory storage)
// reason: async-trait needed for the non-blocking open calls

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

/// Blocking byte stream opened for reading
pub type ReadStream = Box<dyn Read + Send>;
/// Blocking byte stream opened for writing
pub type WriteStream = Box<dyn Write + Send>;
/// Non-blocking byte stream opened for reading
pub type AsyncReadStream = Box<dyn AsyncRead + Send + Unpin>;
/// Non-blocking byte stream opened for writing
pub type AsyncWriteStream = Box<dyn AsyncWrite + Send + Unpin>;

/// Filesystem capability
///
/// The only file access TextProcessor needs: open a path for reading, or
/// create/truncate a path for writing. Dropping a returned stream closes it.
///
/// Implementations:
/// - HostFileSystem: the real filesystem (std::fs / tokio::fs)
/// - mocks::InMemoryFileSystem: in-memory storage for tests
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Open an existing file for reading
    ///
    /// # Errors
    /// - `NotFound` if the path does not exist
    /// - `PermissionDenied` if the file cannot be read
    fn open_read(&self, path: &Path) -> io::Result<ReadStream>;

    /// Create a file for writing, truncating any existing content
    ///
    /// # Errors
    /// - `NotFound` if the parent directory does not exist
    /// - `PermissionDenied` if the file cannot be written
    fn open_write(&self, path: &Path) -> io::Result<WriteStream>;

    /// Async twin of [`FileSystem::open_read`]
    async fn open_read_async(&self, path: &Path) -> io::Result<AsyncReadStream>;

    /// Async twin of [`FileSystem::open_write`]
    async fn open_write_async(&self, path: &Path) -> io::Result<AsyncWriteStream>;
}

/// Host filesystem (production)
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFileSystem;

#[async_trait]
impl FileSystem for HostFileSystem {
    fn open_read(&self, path: &Path) -> io::Result<ReadStream> {
        debug!(path = %path.display(), "Opening file for read");
        Ok(Box::new(File::open(path)?))
    }

    fn open_write(&self, path: &Path) -> io::Result<WriteStream> {
        debug!(path = %path.display(), "Opening file for write");
        Ok(Box::new(File::create(path)?))
    }

    async fn open_read_async(&self, path: &Path) -> io::Result<AsyncReadStream> {
        debug!(path = %path.display(), "Opening file for async read");
        Ok(Box::new(tokio::fs::File::open(path).await?))
    }

    async fn open_write_async(&self, path: &Path) -> io::Result<AsyncWriteStream> {
        debug!(path = %path.display(), "Opening file for async write");
        Ok(Box::new(tokio::fs::File::create(path).await?))
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::pin::Pin;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    use std::task::{Context, Poll};
    use tokio::io::ReadBuf;

    #[derive(Debug, Default)]
    struct State {
        files: HashMap<PathBuf, Vec<u8>>,
        dirs: HashSet<PathBuf>,
        read_denied: HashSet<PathBuf>,
        write_denied: HashSet<PathBuf>,
        // Bytes accepted before writes to the path start failing
        write_limits: HashMap<PathBuf, usize>,
        open_handles: usize,
        opens: usize,
    }

    impl State {
        fn parent_exists(&self, path: &Path) -> bool {
            match path.parent() {
                None => true,
                Some(parent) if parent.as_os_str().is_empty() || parent == Path::new("/") => true,
                Some(parent) => self.dirs.contains(parent),
            }
        }

        fn add_dir_all(&mut self, dir: &Path) {
            for ancestor in dir.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    type Shared = Arc<Mutex<State>>;

    fn lock(state: &Shared) -> MutexGuard<'_, State> {
        state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// In-memory FileSystem for testing
    ///
    /// Directories must exist (via `add_dir` or an earlier `add_file`) before
    /// files can be created inside them. Paths under the root or without a
    /// parent always resolve.
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryFileSystem {
        state: Shared,
    }

    impl InMemoryFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seed a file, creating its parent directories
        pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
            let path = path.as_ref();
            let mut state = lock(&self.state);
            if let Some(parent) = path.parent() {
                state.add_dir_all(parent);
            }
            state
                .files
                .insert(path.to_path_buf(), contents.as_ref().to_vec());
        }

        pub fn add_dir(&self, path: impl AsRef<Path>) {
            lock(&self.state).add_dir_all(path.as_ref());
        }

        /// Raw bytes currently stored at `path`
        pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
            lock(&self.state).files.get(path.as_ref()).cloned()
        }

        pub fn exists(&self, path: impl AsRef<Path>) -> bool {
            lock(&self.state).files.contains_key(path.as_ref())
        }

        /// Opening `path` for read fails with `PermissionDenied`
        pub fn deny_read(&self, path: impl AsRef<Path>) {
            lock(&self.state)
                .read_denied
                .insert(path.as_ref().to_path_buf());
        }

        /// Opening `path` for write fails with `PermissionDenied`
        pub fn deny_write(&self, path: impl AsRef<Path>) {
            lock(&self.state)
                .write_denied
                .insert(path.as_ref().to_path_buf());
        }

        /// Writes to `path` fail once `bytes` bytes have been accepted
        pub fn fail_writes_after(&self, path: impl AsRef<Path>, bytes: usize) {
            lock(&self.state)
                .write_limits
                .insert(path.as_ref().to_path_buf(), bytes);
        }

        /// Streams opened and not yet dropped
        pub fn open_handles(&self) -> usize {
            lock(&self.state).open_handles
        }

        /// Total number of successful opens
        pub fn open_count(&self) -> usize {
            lock(&self.state).opens
        }

        fn reader(&self, path: &Path) -> io::Result<MemoryReader> {
            let mut state = lock(&self.state);
            if state.read_denied.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("read denied: {}", path.display()),
                ));
            }
            let data = state.files.get(path).cloned().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })?;
            state.open_handles += 1;
            state.opens += 1;
            Ok(MemoryReader {
                cursor: Cursor::new(data),
                _handle: HandleGuard(self.state.clone()),
            })
        }

        fn writer(&self, path: &Path) -> io::Result<MemoryWriter> {
            let mut state = lock(&self.state);
            if !state.parent_exists(path) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", path.display()),
                ));
            }
            if state.write_denied.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("write denied: {}", path.display()),
                ));
            }
            state.files.insert(path.to_path_buf(), Vec::new());
            let remaining = state.write_limits.get(path).copied();
            state.open_handles += 1;
            state.opens += 1;
            Ok(MemoryWriter {
                state: self.state.clone(),
                path: path.to_path_buf(),
                remaining,
                _handle: HandleGuard(self.state.clone()),
            })
        }
    }

    #[async_trait]
    impl FileSystem for InMemoryFileSystem {
        fn open_read(&self, path: &Path) -> io::Result<ReadStream> {
            Ok(Box::new(self.reader(path)?))
        }

        fn open_write(&self, path: &Path) -> io::Result<WriteStream> {
            Ok(Box::new(self.writer(path)?))
        }

        async fn open_read_async(&self, path: &Path) -> io::Result<AsyncReadStream> {
            Ok(Box::new(self.reader(path)?))
        }

        async fn open_write_async(&self, path: &Path) -> io::Result<AsyncWriteStream> {
            Ok(Box::new(self.writer(path)?))
        }
    }

    /// Decrements the open handle count on drop
    #[derive(Debug)]
    struct HandleGuard(Shared);

    impl Drop for HandleGuard {
        fn drop(&mut self) {
            let mut state = lock(&self.0);
            state.open_handles = state.open_handles.saturating_sub(1);
        }
    }

    /// Snapshot of a file taken at open time
    #[derive(Debug)]
    struct MemoryReader {
        cursor: Cursor<Vec<u8>>,
        _handle: HandleGuard,
    }

    impl Read for MemoryReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.cursor.read(buf)
        }
    }

    impl AsyncRead for MemoryReader {
        fn poll_read(
            self: Pin<&mut Self>,
            cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Pin::new(&mut self.get_mut().cursor).poll_read(cx, buf)
        }
    }

    /// Appends straight into the shared file map
    #[derive(Debug)]
    struct MemoryWriter {
        state: Shared,
        path: PathBuf,
        remaining: Option<usize>,
        _handle: HandleGuard,
    }

    impl Write for MemoryWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let accepted = match self.remaining {
                Some(0) if !buf.is_empty() => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        format!("simulated write failure: {}", self.path.display()),
                    ));
                }
                Some(limit) => buf.len().min(limit),
                None => buf.len(),
            };
            if let Some(limit) = self.remaining.as_mut() {
                *limit -= accepted;
            }
            lock(&self.state)
                .files
                .entry(self.path.clone())
                .or_default()
                .extend_from_slice(&buf[..accepted]);
            Ok(accepted)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl AsyncWrite for MemoryWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Write::write(self.get_mut(), buf))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::InMemoryFileSystem;
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn test_in_memory_read_missing() {
        let fs = InMemoryFileSystem::new();
        let err = fs.open_read(Path::new("/missing.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(fs.open_count(), 0);
    }

    #[test]
    fn test_in_memory_write_requires_parent_dir() {
        let fs = InMemoryFileSystem::new();
        let err = fs.open_write(Path::new("/out/file.txt")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!fs.exists("/out/file.txt"));

        fs.add_dir("/out");
        assert!(fs.open_write(Path::new("/out/file.txt")).is_ok());
        assert!(fs.open_write(Path::new("top-level.txt")).is_ok());
    }

    #[test]
    fn test_in_memory_write_truncates() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/data/out.txt", "old content");

        let mut stream = fs.open_write(Path::new("/data/out.txt")).unwrap();
        assert_eq!(fs.contents("/data/out.txt").unwrap(), b"");
        stream.write_all(b"new").unwrap();
        drop(stream);

        assert_eq!(fs.contents("/data/out.txt").unwrap(), b"new");
        assert_eq!(fs.open_handles(), 0);
    }

    #[test]
    fn test_in_memory_denied() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/locked.txt", "secret");
        fs.deny_read("/locked.txt");
        fs.deny_write("/locked.txt");

        let read = fs.open_read(Path::new("/locked.txt")).err().unwrap();
        let write = fs.open_write(Path::new("/locked.txt")).err().unwrap();
        assert_eq!(read.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(write.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(fs.contents("/locked.txt").unwrap(), b"secret");
    }

    #[test]
    fn test_in_memory_write_failure_leaves_partial_file() {
        let fs = InMemoryFileSystem::new();
        fs.fail_writes_after("/out.txt", 3);

        let mut stream = fs.open_write(Path::new("/out.txt")).unwrap();
        let err = stream.write_all(b"abcdef").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(fs.contents("/out.txt").unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_in_memory_async_streams() {
        let fs = InMemoryFileSystem::new();
        fs.add_file("/in.txt", "payload");

        let mut reader = fs.open_read_async(Path::new("/in.txt")).await.unwrap();
        let mut text = String::new();
        reader.read_to_string(&mut text).await.unwrap();
        assert_eq!(text, "payload");
        assert_eq!(fs.open_handles(), 1);
        drop(reader);

        let mut writer = fs.open_write_async(Path::new("/copy.txt")).await.unwrap();
        writer.write_all(text.as_bytes()).await.unwrap();
        writer.flush().await.unwrap();
        drop(writer);

        assert_eq!(fs.contents("/copy.txt").unwrap(), b"payload");
        assert_eq!(fs.open_handles(), 0);
        assert_eq!(fs.open_count(), 2);
    }
}
