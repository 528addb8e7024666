// Application Layer - Use cases over the filesystem port

pub mod text_processor;
pub mod text_writer;

// Re-exports
pub use text_processor::TextProcessor;
pub use text_writer::{AsyncTextWriter, TextWriter};
