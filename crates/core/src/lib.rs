// textflow Core - line handling, filesystem port and TextProcessor
// NO concrete storage choices beyond the host filesystem default

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::TextProcessor;
pub use domain::LineEnding;
pub use error::{Result, TextError};
pub use port::{FileSystem, HostFileSystem};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
