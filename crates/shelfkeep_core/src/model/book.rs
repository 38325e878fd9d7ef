//! Book domain model.
//!
//! # Responsibility
//! - Define the record stored for one book.
//! - Provide the issue/return transitions between lifecycle states.
//!
//! # Invariants
//! - `status` is always exactly one of `Available` or `Issued`.
//! - `issue` only moves `Available -> Issued`; `return_book` only moves
//!   `Issued -> Available`. Any other call mutates nothing.
//! - `title` and `isbn` are non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Availability state of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// On the shelf and can be issued.
    #[default]
    Available,
    /// Lent out; must be returned before it can be issued again.
    Issued,
}

impl BookStatus {
    /// Returns the literal used by the storage format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Issued => "issued",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Issued => "Issued",
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for book records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyIsbn,
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyIsbn => write!(f, "isbn must not be empty"),
        }
    }
}

impl Error for BookValidationError {}

/// One book and its availability state.
///
/// Field order here is the field order of the storage format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    pub title: String,
    pub author: String,
    /// Unique key within a repository. No normalization is applied.
    pub isbn: String,
    pub status: BookStatus,
}

impl Book {
    /// Creates a validated book in the `Available` state.
    ///
    /// # Errors
    /// - Returns `EmptyTitle` / `EmptyIsbn` when either is blank.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Result<Self, BookValidationError> {
        let book = Self {
            title: title.into(),
            author: author.into(),
            isbn: isbn.into(),
            status: BookStatus::Available,
        };
        book.validate()?;
        Ok(book)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        if self.isbn.trim().is_empty() {
            return Err(BookValidationError::EmptyIsbn);
        }
        Ok(())
    }

    /// Marks the book issued. Returns `false` and leaves the record untouched
    /// when it is already issued.
    pub fn issue(&mut self) -> bool {
        if self.status != BookStatus::Available {
            return false;
        }
        self.status = BookStatus::Issued;
        true
    }

    /// Marks the book available again. Returns `false` and leaves the record
    /// untouched when it is not issued.
    pub fn return_book(&mut self) -> bool {
        if self.status != BookStatus::Issued {
            return false;
        }
        self.status = BookStatus::Available;
        true
    }

    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Title: {}, Author: {}, ISBN: {}, Status: {}",
            self.title,
            self.author,
            self.isbn,
            self.status.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookStatus};

    #[test]
    fn status_literals_match_wire_format() {
        for status in [BookStatus::Available, BookStatus::Issued] {
            let wire = serde_json::to_value(status).unwrap();
            assert_eq!(wire, status.as_str());
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn display_capitalizes_status() {
        let mut book = Book::new("Dune", "Frank Herbert", "111").unwrap();
        assert_eq!(
            book.to_string(),
            "Title: Dune, Author: Frank Herbert, ISBN: 111, Status: Available"
        );
        book.issue();
        assert!(book.to_string().ends_with("Status: Issued"));
    }
}
