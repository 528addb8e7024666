// Port Layer - Interfaces for external dependencies

pub mod filesystem;

// Re-exports
pub use filesystem::{
    AsyncReadStream, AsyncWriteStream, FileSystem, HostFileSystem, ReadStream, WriteStream,
};
