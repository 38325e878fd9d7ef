//! Domain model for the book inventory.
//!
//! # Responsibility
//! - Define the canonical book record and its lifecycle state.
//! - Keep state transitions pure so persistence stays a repository concern.
//!
//! # Invariants
//! - Every book is identified by its `isbn`, compared by exact value.
//! - Books are never deleted; only their status changes.

pub mod book;
