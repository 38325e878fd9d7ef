//! Menu-driven console loop.
//!
//! # Responsibility
//! - Prompt for input, validate it, and call the repository surface.
//! - Keep no inventory state of its own.
//!
//! # Invariants
//! - A failing or panicking command never ends the loop; it is reported at
//!   critical level and the menu is shown again.
//! - End of input ends the loop cleanly.

use crate::render;
use shelfkeep_core::{BookRepository, RepoError, Reporter};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

const MENU: &str = "
--- Library Inventory Manager ---
1. Add New Book
2. Issue Book
3. Return Book
4. View All Books
5. Search Books
6. Exit
---------------------------------";

#[derive(Debug)]
pub enum ShellError {
    Io(io::Error),
    /// Input closed while a prompt was waiting.
    EndOfInput,
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console i/o failed: {err}"),
            Self::EndOfInput => write!(f, "input closed"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::EndOfInput => None,
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

pub type ShellResult<T> = Result<T, ShellError>;

/// Interactive front end over a book repository.
pub struct Shell<'a, B, R, I, O> {
    repo: &'a mut B,
    reporter: R,
    input: I,
    output: O,
}

impl<'a, B, R, I, O> Shell<'a, B, R, I, O>
where
    B: BookRepository,
    R: Reporter,
    I: BufRead,
    O: Write,
{
    pub fn new(repo: &'a mut B, reporter: R, input: I, output: O) -> Self {
        Self {
            repo,
            reporter,
            input,
            output,
        }
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// # Errors
    /// - Returns `Io` only when the console itself cannot be written.
    pub fn run(&mut self) -> ShellResult<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let choice = match self.prompt_valid(
                "Enter your choice (1-6): ",
                |value| matches!(value, "1" | "2" | "3" | "4" | "5" | "6"),
                "Invalid choice. Please enter a number between 1 and 6.",
            ) {
                Ok(choice) => choice,
                Err(ShellError::EndOfInput) => break,
                Err(err) => return Err(err),
            };

            if choice == "6" {
                writeln!(self.output, "Exiting Library Inventory Manager. Goodbye!")?;
                self.reporter
                    .info("event=app_exit module=cli status=ok reason=user");
                return Ok(());
            }

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(&choice)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(ShellError::EndOfInput)) => break,
                Ok(Err(err)) => self.recover(&choice, &err.to_string())?,
                Err(payload) => self.recover(&choice, &panic_message(payload.as_ref()))?,
            }
        }

        self.reporter
            .info("event=app_exit module=cli status=ok reason=end_of_input");
        Ok(())
    }

    fn recover(&mut self, choice: &str, detail: &str) -> ShellResult<()> {
        self.reporter.critical(&format!(
            "event=command_failed module=cli status=error choice={choice} error={detail}"
        ));
        writeln!(
            self.output,
            "An unexpected error occurred. Please check the logs."
        )?;
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> ShellResult<()> {
        match choice {
            "1" => self.add_book(),
            "2" => self.issue_book(),
            "3" => self.return_book(),
            "4" => Ok(render::inventory(&mut self.output, self.repo.list_all())?),
            "5" => self.search_books(),
            _ => Ok(()),
        }
    }

    fn add_book(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- Add New Book ---")?;
        let title = self.prompt_valid("Enter title: ", non_empty, "Title cannot be empty.")?;
        let author = self.prompt("Enter author: ")?;
        let isbn = self.prompt_valid("Enter ISBN: ", non_empty, "ISBN cannot be empty.")?;

        match self.repo.add_book(&title, &author, &isbn) {
            Ok(_) => writeln!(
                self.output,
                "'{title}' by {author} (ISBN: {isbn}) added successfully."
            )?,
            Err(err) => render::failure(&mut self.output, &err, None)?,
        }
        self.warn_if_unsaved()
    }

    fn issue_book(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- Issue Book ---")?;
        let isbn = self.prompt_valid(
            "Enter ISBN of the book to issue: ",
            non_empty,
            "ISBN cannot be empty.",
        )?;

        match self.repo.issue_by_isbn(&isbn) {
            Ok(book) => {
                let title = book.title.clone();
                writeln!(
                    self.output,
                    "Book '{title}' (ISBN: {isbn}) has been issued."
                )?;
            }
            Err(err) => self.explain(&err, &isbn)?,
        }
        self.warn_if_unsaved()
    }

    fn return_book(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- Return Book ---")?;
        let isbn = self.prompt_valid(
            "Enter ISBN of the book to return: ",
            non_empty,
            "ISBN cannot be empty.",
        )?;

        match self.repo.return_by_isbn(&isbn) {
            Ok(book) => {
                let title = book.title.clone();
                writeln!(
                    self.output,
                    "Book '{title}' (ISBN: {isbn}) has been returned."
                )?;
            }
            Err(err) => self.explain(&err, &isbn)?,
        }
        self.warn_if_unsaved()
    }

    fn search_books(&mut self) -> ShellResult<()> {
        writeln!(self.output, "\n--- Search Books ---")?;
        writeln!(self.output, "1. Search by Title")?;
        writeln!(self.output, "2. Search by ISBN")?;
        let choice = self.prompt_valid(
            "Enter your choice (1-2): ",
            |value| matches!(value, "1" | "2"),
            "Invalid choice. Please enter 1 or 2.",
        )?;

        if choice == "1" {
            let query = self.prompt("Enter title (partial match allowed): ")?;
            let hits = self.repo.search_by_title(&query);
            render::title_matches(&mut self.output, &query, &hits)?;
        } else {
            let isbn = self.prompt("Enter ISBN: ")?;
            render::isbn_match(&mut self.output, &isbn, self.repo.search_by_isbn(&isbn))?;
        }
        Ok(())
    }

    fn explain(&mut self, err: &RepoError, isbn: &str) -> ShellResult<()> {
        let title = self.repo.search_by_isbn(isbn).map(|book| book.title.as_str());
        render::failure(&mut self.output, err, title)?;
        Ok(())
    }

    fn warn_if_unsaved(&mut self) -> ShellResult<()> {
        if self.repo.has_unsaved_changes() {
            render::unsaved_warning(&mut self.output)?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> ShellResult<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_valid(
        &mut self,
        text: &str,
        accept: impl Fn(&str) -> bool,
        complaint: &str,
    ) -> ShellResult<String> {
        loop {
            let value = self.prompt(text)?;
            if accept(&value) {
                return Ok(value);
            }
            writeln!(self.output, "{complaint}")?;
            self.reporter.warning(&format!(
                "event=invalid_input module=cli status=rejected prompt={:?} value={value:?}",
                text.trim()
            ));
        }
    }
}

fn non_empty(value: &str) -> bool {
    !value.is_empty()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
