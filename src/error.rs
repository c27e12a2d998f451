//! Error handling for file mapping operations.

use std::fmt;
use std::io;
use std::result;

/// A specialized `Result` type for file mapping operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while opening, sizing, mapping, or releasing a file.
#[derive(Debug)]
pub enum Error {
    /// The file could not be opened.
    Open(io::Error),

    /// An adopted raw handle was the invalid sentinel.
    InvalidHandle,

    /// The operation requires an open handle but none exists.
    NotOpen,

    /// The file size query failed.
    Stat(io::Error),

    /// Attempted to map a zero-length file.
    EmptyFile,

    /// The OS mapping call failed.
    Map(io::Error),

    /// Unmap was requested while nothing was mapped.
    NotMapped,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open(err) => write!(f, "failed to open file: {}", err),
            Error::InvalidHandle => write!(f, "adopted handle was the invalid sentinel"),
            Error::NotOpen => write!(f, "operation requires an open handle"),
            Error::Stat(err) => write!(f, "file size query failed: {}", err),
            Error::EmptyFile => write!(f, "cannot map a zero-length file"),
            Error::Map(err) => write!(f, "memory mapping failed: {}", err),
            Error::NotMapped => write!(f, "nothing is mapped"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open(err) | Error::Stat(err) | Error::Map(err) => Some(err),
            _ => None,
        }
    }
}
