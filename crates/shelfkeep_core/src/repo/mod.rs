//! Repository layer for the book inventory.
//!
//! # Responsibility
//! - Define the use-case oriented contract the presentation layer calls.
//! - Keep file format details behind the storage boundary.
//!
//! # Invariants
//! - No two books in a repository share an `isbn`.
//! - Every successful mutation is persisted before it is reported as done.

pub mod book_repo;
