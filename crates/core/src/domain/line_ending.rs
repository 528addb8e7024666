// Line terminator conventions

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;

/// Line terminator sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// Line Feed (Unix/Linux/macOS) - \n
    Lf,
    /// Carriage Return + Line Feed (Windows) - \r\n
    CrLf,
    /// Carriage Return (classic Mac OS) - \r
    Cr,
}

impl LineEnding {
    /// The host platform convention
    pub const fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
            LineEnding::Cr => "\r",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            LineEnding::Lf => "lf",
            LineEnding::CrLf => "crlf",
            LineEnding::Cr => "cr",
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineEnding {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::CrLf),
            "cr" => Ok(LineEnding::Cr),
            "native" => Ok(LineEnding::native()),
            _ => Err(DomainError::InvalidLineEnding(s.to_string())),
        }
    }
}
