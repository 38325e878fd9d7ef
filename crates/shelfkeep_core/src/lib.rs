//! Core domain logic for the shelfkeep book inventory.
//! This crate is the single source of truth for inventory invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig};
pub use model::book::{Book, BookStatus, BookValidationError};
pub use repo::book_repo::{
    BookRepository, FileBookRepository, RepoError, RepoResult, DEFAULT_DATA_FILE,
};
pub use report::{LogReporter, MemoryReporter, ReportLevel, Reporter};
pub use storage::{read_books, write_books, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
