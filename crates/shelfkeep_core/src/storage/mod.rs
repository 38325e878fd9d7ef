//! Flat-file storage for the book inventory.
//!
//! # Responsibility
//! - Read and write the full record set as one JSON document.
//! - Validate every persisted entry before it becomes a `Book`.
//!
//! # Invariants
//! - Reads are all-or-nothing: one bad entry rejects the whole file.
//! - Writes replace the whole file and never leave it half-written.
//! - A missing file is not an error; it reads as "no data yet".

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod file;

pub use file::{read_books, write_books};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    /// Filesystem failure while reading or writing `path`.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a JSON array.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// One array entry does not describe a valid book.
    InvalidEntry {
        path: PathBuf,
        index: usize,
        message: String,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Malformed { path, source } => {
                write!(f, "malformed book data in `{}`: {source}", path.display())
            }
            Self::InvalidEntry {
                path,
                index,
                message,
            } => write!(
                f,
                "invalid book entry #{index} in `{}`: {message}",
                path.display()
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::InvalidEntry { .. } => None,
        }
    }
}
