//! One-shot subcommands.
//!
//! Each returns whether the requested operation succeeded; console write
//! failures surface as `io::Error`. Arguments reach the repository verbatim.

use crate::render;
use shelfkeep_core::BookRepository;
use std::io::{self, Write};

pub fn add(
    repo: &mut impl BookRepository,
    out: &mut impl Write,
    title: &str,
    author: &str,
    isbn: &str,
) -> io::Result<bool> {
    let ok = match repo.add_book(title, author, isbn) {
        Ok(book) => {
            writeln!(
                out,
                "'{}' by {} (ISBN: {}) added successfully.",
                book.title, book.author, book.isbn
            )?;
            true
        }
        Err(err) => {
            render::failure(out, &err, None)?;
            false
        }
    };
    finish(repo, out, ok)
}

pub fn issue(repo: &mut impl BookRepository, out: &mut impl Write, isbn: &str) -> io::Result<bool> {
    let ok = match repo.issue_by_isbn(isbn) {
        Ok(book) => {
            writeln!(out, "Book '{}' (ISBN: {isbn}) has been issued.", book.title)?;
            true
        }
        Err(err) => {
            let title = repo.search_by_isbn(isbn).map(|book| book.title.as_str());
            render::failure(out, &err, title)?;
            false
        }
    };
    finish(repo, out, ok)
}

pub fn return_book(
    repo: &mut impl BookRepository,
    out: &mut impl Write,
    isbn: &str,
) -> io::Result<bool> {
    let ok = match repo.return_by_isbn(isbn) {
        Ok(book) => {
            writeln!(out, "Book '{}' (ISBN: {isbn}) has been returned.", book.title)?;
            true
        }
        Err(err) => {
            let title = repo.search_by_isbn(isbn).map(|book| book.title.as_str());
            render::failure(out, &err, title)?;
            false
        }
    };
    finish(repo, out, ok)
}

pub fn list(repo: &impl BookRepository, out: &mut impl Write) -> io::Result<bool> {
    render::inventory(out, repo.list_all())?;
    Ok(true)
}

/// Searches by title when given, otherwise by isbn. Finding nothing is a
/// failed command.
pub fn search(
    repo: &impl BookRepository,
    out: &mut impl Write,
    title: Option<&str>,
    isbn: Option<&str>,
) -> io::Result<bool> {
    match (title, isbn) {
        (Some(query), _) => {
            let hits = repo.search_by_title(query);
            render::title_matches(out, query, &hits)?;
            Ok(!hits.is_empty())
        }
        (None, Some(isbn)) => {
            let hit = repo.search_by_isbn(isbn);
            render::isbn_match(out, isbn, hit)?;
            Ok(hit.is_some())
        }
        (None, None) => Ok(false),
    }
}

fn finish(repo: &impl BookRepository, out: &mut impl Write, ok: bool) -> io::Result<bool> {
    if ok && repo.has_unsaved_changes() {
        render::unsaved_warning(out)?;
        return Ok(false);
    }
    Ok(ok)
}
