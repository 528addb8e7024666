// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid line ending: {0} (expected lf, crlf, cr or native)")]
    InvalidLineEnding(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
