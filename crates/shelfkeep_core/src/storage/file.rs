//! JSON file codec for book records.
//!
//! # Responsibility
//! - Decode the stored array into validated `Book` values.
//! - Encode the record set with stable field order and indentation.
//!
//! # Invariants
//! - Entries must carry exactly `title`, `author`, `isbn`, `status`.
//! - Output is a pure function of the input slice, so repeated writes of
//!   unchanged data are byte-identical.
//! - Replacing an existing file keeps its permissions; a new file gets the
//!   process umask default, as a plain create would.

use super::{StorageError, StorageResult};
use crate::model::book::Book;
use log::{debug, error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs::Permissions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::Builder;

const INDENT: &[u8] = b"    ";

/// Reads every book stored at `path`.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
/// - `Io` when the file exists but cannot be read.
/// - `Malformed` when the content is not a JSON array.
/// - `InvalidEntry` for the first entry that fails decoding or validation.
pub fn read_books(path: &Path) -> StorageResult<Option<Vec<Book>>> {
    let started_at = Instant::now();
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(
                "event=storage_read module=storage status=missing path={}",
                path.display()
            );
            return Ok(None);
        }
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let entries: Vec<Value> =
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let books = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| decode_entry(path, index, entry))
        .collect::<StorageResult<Vec<_>>>()?;

    debug!(
        "event=storage_read module=storage status=ok path={} count={} duration_ms={}",
        path.display(),
        books.len(),
        started_at.elapsed().as_millis()
    );
    Ok(Some(books))
}

/// Replaces the content at `path` with `books`.
///
/// The parent directory is created when absent. Data goes to a temporary
/// sibling first and is renamed over the target.
pub fn write_books(path: &Path, books: &[Book]) -> StorageResult<()> {
    let started_at = Instant::now();
    let io_error = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = parent_dir(path);
    std::fs::create_dir_all(&parent).map_err(io_error)?;

    let mut staged = staging_builder()
        .tempfile_in(&parent)
        .map_err(io_error)?;
    if let Some(permissions) = existing_permissions(path).map_err(io_error)? {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(io_error)?;
    }
    encode_books(staged.as_file_mut(), books).map_err(io_error)?;
    staged.as_file_mut().flush().map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;

    if let Err(err) = staged.persist(path) {
        error!(
            "event=storage_write module=storage status=error path={} duration_ms={} error={}",
            path.display(),
            started_at.elapsed().as_millis(),
            err.error
        );
        return Err(io_error(err.error));
    }

    info!(
        "event=storage_write module=storage status=ok path={} count={} duration_ms={}",
        path.display(),
        books.len(),
        started_at.elapsed().as_millis()
    );
    Ok(())
}

fn decode_entry(path: &Path, index: usize, entry: Value) -> StorageResult<Book> {
    let invalid = |message: String| StorageError::InvalidEntry {
        path: path.to_path_buf(),
        index,
        message,
    };
    let book: Book = serde_json::from_value(entry).map_err(|err| invalid(err.to_string()))?;
    book.validate().map_err(|err| invalid(err.to_string()))?;
    Ok(book)
}

fn encode_books(writer: impl Write, books: &[Book]) -> std::io::Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    books.serialize(&mut serializer).map_err(std::io::Error::from)
}

fn existing_permissions(path: &Path) -> std::io::Result<Option<Permissions>> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Staged files default to owner-only; ask for 0666 so the umask decides.
#[cfg(unix)]
fn staging_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(Permissions::from_mode(0o666));
    builder
}

#[cfg(not(unix))]
fn staging_builder() -> Builder<'static, 'static> {
    Builder::new()
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
