// Domain Layer - Pure line handling, no filesystem access

pub mod error;
pub mod line_ending;
pub mod lines;

// Re-exports
pub use error::DomainError;
pub use line_ending::LineEnding;
pub use lines::{join_lines, split_lines, LineReader};
