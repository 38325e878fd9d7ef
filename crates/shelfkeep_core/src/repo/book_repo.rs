//! Book repository contract and file-backed implementation.
//!
//! # Responsibility
//! - Own the in-memory record set and keep it in step with one data file.
//! - Enforce isbn uniqueness and the issue/return lifecycle.
//!
//! # Invariants
//! - Insertion order is preserved, both in memory and on disk.
//! - Construction never fails: a missing or unreadable file yields an empty set.
//! - Mutations persist inside the same call; callers cannot forget to save.
//! - A failed save is reported, never raised; memory stays the source of truth.

use crate::model::book::{Book, BookStatus, BookValidationError};
use crate::report::{LogReporter, Reporter};
use crate::storage::{read_books, write_books};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Data file used when no location is configured.
pub const DEFAULT_DATA_FILE: &str = "books.json";

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic failures of repository operations. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(BookValidationError),
    DuplicateIsbn(String),
    NotFound(String),
    /// Issue of an issued book, or return of an available one.
    InvalidTransition {
        isbn: String,
        status: BookStatus,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateIsbn(isbn) => write!(f, "a book with isbn `{isbn}` already exists"),
            Self::NotFound(isbn) => write!(f, "no book found with isbn `{isbn}`"),
            Self::InvalidTransition { isbn, status } => {
                write!(f, "book `{isbn}` is already {status}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateIsbn(_) | Self::NotFound(_) | Self::InvalidTransition { .. } => None,
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface consumed by the presentation layer.
pub trait BookRepository {
    /// Appends `book` unless its isbn is already present.
    fn add(&mut self, book: Book) -> RepoResult<&Book>;
    fn issue_by_isbn(&mut self, isbn: &str) -> RepoResult<&Book>;
    fn return_by_isbn(&mut self, isbn: &str) -> RepoResult<&Book>;
    /// Case-insensitive substring match on titles, in storage order.
    fn search_by_title(&self, query: &str) -> Vec<&Book>;
    /// Exact isbn lookup; the first match in storage order wins.
    fn search_by_isbn(&self, isbn: &str) -> Option<&Book>;
    fn list_all(&self) -> &[Book];
    /// Writes the full record set to storage. Returns whether it succeeded.
    fn persist(&mut self) -> bool;
    /// Returns `true` while memory holds changes the last save did not store.
    fn has_unsaved_changes(&self) -> bool;

    /// Builds a new available book and adds it.
    fn add_book(&mut self, title: &str, author: &str, isbn: &str) -> RepoResult<&Book> {
        let book = Book::new(title, author, isbn)?;
        self.add(book)
    }
}

/// Book repository backed by one JSON data file.
#[derive(Debug)]
pub struct FileBookRepository<R: Reporter = LogReporter> {
    path: PathBuf,
    books: Vec<Book>,
    reporter: R,
    unsaved: bool,
}

impl FileBookRepository<LogReporter> {
    /// Opens the repository at `path`, reporting through the `log` facade.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::open_with_reporter(path, LogReporter)
    }
}

impl<R: Reporter> FileBookRepository<R> {
    /// Opens the repository at `path` and loads whatever it holds.
    ///
    /// # Side effects
    /// - Reads the data file once.
    /// - Reports a warning and starts empty when the file cannot be used.
    pub fn open_with_reporter(path: impl Into<PathBuf>, reporter: R) -> Self {
        let path = path.into();
        let books = load_books(&path, &reporter);
        Self {
            path,
            books,
            reporter,
            unsaved: false,
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.path
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, isbn: &str) -> Option<usize> {
        self.books.iter().position(|book| book.isbn == isbn)
    }

    fn transition(
        &mut self,
        isbn: &str,
        event: &str,
        apply: fn(&mut Book) -> bool,
    ) -> RepoResult<&Book> {
        let Some(index) = self.position(isbn) else {
            self.reporter.warning(&format!(
                "event={event} module=repo status=not_found isbn={isbn}"
            ));
            return Err(RepoError::NotFound(isbn.to_string()));
        };

        if !apply(&mut self.books[index]) {
            let status = self.books[index].status;
            self.reporter.warning(&format!(
                "event={event} module=repo status=rejected isbn={isbn} current={status}"
            ));
            return Err(RepoError::InvalidTransition {
                isbn: isbn.to_string(),
                status,
            });
        }

        self.persist();
        self.reporter.info(&format!(
            "event={event} module=repo status=ok isbn={isbn} title={}",
            self.books[index].title
        ));
        Ok(&self.books[index])
    }
}

impl<R: Reporter> BookRepository for FileBookRepository<R> {
    fn add(&mut self, book: Book) -> RepoResult<&Book> {
        book.validate()?;
        if self.position(&book.isbn).is_some() {
            self.reporter.warning(&format!(
                "event=book_add module=repo status=duplicate isbn={}",
                book.isbn
            ));
            return Err(RepoError::DuplicateIsbn(book.isbn));
        }

        self.books.push(book);
        self.persist();

        let index = self.books.len() - 1;
        let added = &self.books[index];
        self.reporter.info(&format!(
            "event=book_add module=repo status=ok isbn={} title={}",
            added.isbn, added.title
        ));
        Ok(added)
    }

    fn issue_by_isbn(&mut self, isbn: &str) -> RepoResult<&Book> {
        self.transition(isbn, "book_issue", Book::issue)
    }

    fn return_by_isbn(&mut self, isbn: &str) -> RepoResult<&Book> {
        self.transition(isbn, "book_return", Book::return_book)
    }

    fn search_by_title(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.title.to_lowercase().contains(&needle))
            .collect()
    }

    fn search_by_isbn(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.isbn == isbn)
    }

    fn list_all(&self) -> &[Book] {
        &self.books
    }

    fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    fn persist(&mut self) -> bool {
        match write_books(&self.path, &self.books) {
            Ok(()) => {
                self.unsaved = false;
                true
            }
            Err(err) => {
                self.unsaved = true;
                self.reporter.error(&format!(
                    "event=persist module=repo status=error path={} error={err}",
                    self.path.display()
                ));
                false
            }
        }
    }
}

fn load_books(path: &Path, reporter: &impl Reporter) -> Vec<Book> {
    match read_books(path) {
        Ok(None) => {
            reporter.info(&format!(
                "event=load module=repo status=missing path={} detail=starting with an empty inventory",
                path.display()
            ));
            Vec::new()
        }
        Ok(Some(books)) => {
            warn_duplicate_isbns(&books, reporter);
            reporter.info(&format!(
                "event=load module=repo status=ok path={} count={}",
                path.display(),
                books.len()
            ));
            books
        }
        Err(err) => {
            reporter.warning(&format!(
                "event=load module=repo status=unreadable path={} detail=starting with an empty inventory error={err}",
                path.display()
            ));
            Vec::new()
        }
    }
}

fn warn_duplicate_isbns(books: &[Book], reporter: &impl Reporter) {
    let mut seen = HashSet::new();
    for book in books {
        if !seen.insert(book.isbn.as_str()) {
            reporter.warning(&format!(
                "event=load module=repo status=duplicate isbn={} detail=first record wins on lookup",
                book.isbn
            ));
        }
    }
}
