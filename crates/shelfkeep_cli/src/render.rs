//! Console rendering shared by the menu and one-shot commands.

use shelfkeep_core::{Book, RepoError};
use std::io::{self, Write};

const RULE: &str = "-------------------------------";

pub fn inventory(out: &mut impl Write, books: &[Book]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "The library inventory is empty.");
    }
    writeln!(out, "\n--- Current Library Inventory ---")?;
    for book in books {
        writeln!(out, "{book}")?;
    }
    writeln!(out, "{RULE}")
}

pub fn title_matches(out: &mut impl Write, query: &str, books: &[&Book]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "No books found matching title: '{query}'");
    }
    writeln!(out, "\n--- Search Results for Title '{query}' ---")?;
    for book in books {
        writeln!(out, "{book}")?;
    }
    writeln!(out, "{RULE}")
}

pub fn isbn_match(out: &mut impl Write, isbn: &str, book: Option<&Book>) -> io::Result<()> {
    match book {
        Some(book) => {
            writeln!(out, "\n--- Search Result for ISBN '{isbn}' ---")?;
            writeln!(out, "{book}")?;
            writeln!(out, "{RULE}")
        }
        None => writeln!(out, "No book found with ISBN: '{isbn}'"),
    }
}

/// Explains a failed repository call in console wording.
///
/// `title` is the title of the book the isbn points at, when known.
pub fn failure(out: &mut impl Write, err: &RepoError, title: Option<&str>) -> io::Result<()> {
    match (err, title) {
        (RepoError::DuplicateIsbn(isbn), _) => writeln!(
            out,
            "Error: A book with ISBN '{isbn}' already exists in the inventory."
        ),
        (RepoError::NotFound(isbn), _) => writeln!(out, "No book found with ISBN: {isbn}"),
        (RepoError::InvalidTransition { isbn, status }, Some(title)) => {
            writeln!(out, "Book '{title}' (ISBN: {isbn}) is already {status}.")
        }
        (err, _) => writeln!(out, "Error: {err}."),
    }
}

pub fn unsaved_warning(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Warning: the change is kept for this session but could not be saved to disk."
    )
}

#[cfg(test)]
mod tests {
    use super::{failure, inventory, isbn_match};
    use shelfkeep_core::{Book, BookStatus, RepoError};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_inventory_has_dedicated_message() {
        let text = render(|out| inventory(out, &[]));
        assert_eq!(text, "The library inventory is empty.\n");
    }

    #[test]
    fn inventory_lists_books_in_order() {
        let books = vec![
            Book::new("Dune", "Frank Herbert", "111").unwrap(),
            Book::new("Solaris", "Stanislaw Lem", "333").unwrap(),
        ];
        let text = render(|out| inventory(out, &books));
        let dune = text.find("Dune").unwrap();
        let solaris = text.find("Solaris").unwrap();
        assert!(dune < solaris);
    }

    #[test]
    fn missing_isbn_message() {
        let text = render(|out| isbn_match(out, "999", None));
        assert_eq!(text, "No book found with ISBN: '999'\n");
    }

    #[test]
    fn invalid_transition_names_the_book() {
        let err = RepoError::InvalidTransition {
            isbn: "111".to_string(),
            status: BookStatus::Issued,
        };
        let text = render(|out| failure(out, &err, Some("Dune")));
        assert_eq!(text, "Book 'Dune' (ISBN: 111) is already issued.\n");
    }
}
