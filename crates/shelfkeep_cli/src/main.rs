//! `shelfkeep` command line entry point.
//!
//! # Responsibility
//! - Parse configuration, start logging, and open the inventory once.
//! - Hand control to the interactive menu or a one-shot subcommand.

mod cli;
mod commands;
mod render;
mod shell;

use clap::Parser;
use cli::{Cli, Commands};
use log::error;
use shelfkeep_core::{init_logging, FileBookRepository, LogReporter};
use shell::Shell;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(&cli.logging_config()) {
        eprintln!("shelfkeep: logging unavailable: {err}");
    }

    let mut repo = FileBookRepository::open(&cli.data_file);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let stdin = io::stdin();
            Shell::new(&mut repo, LogReporter, stdin.lock(), &mut out)
                .run()
                .map(|()| true)
                .map_err(|err| err.to_string())
        }
        Commands::Add {
            title,
            author,
            isbn,
        } => commands::add(&mut repo, &mut out, &title, &author, &isbn)
            .map_err(|err| err.to_string()),
        Commands::Issue { isbn } => {
            commands::issue(&mut repo, &mut out, &isbn).map_err(|err| err.to_string())
        }
        Commands::Return { isbn } => {
            commands::return_book(&mut repo, &mut out, &isbn).map_err(|err| err.to_string())
        }
        Commands::List => commands::list(&repo, &mut out).map_err(|err| err.to_string()),
        Commands::Search { title, isbn } => {
            commands::search(&repo, &mut out, title.as_deref(), isbn.as_deref())
                .map_err(|err| err.to_string())
        }
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            eprintln!("shelfkeep: {err}");
            ExitCode::FAILURE
        }
    }
}
