//! Command-line front end for the Jotter notes store.
//!
//! # Responsibility
//! - Resolve configuration, start file logging and open the notes database.
//! - Map each subcommand onto one `NoteStore` operation.
//!
//! # Invariants
//! - A command that changed notes fails when the change could not be saved.

mod config;
mod render;

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use jotter_core::db::open_db;
use jotter_core::{init_logging, NoteStore, SqlitePreferenceStore, TextNormalizer};
use log::{error, info};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "jotter", version, about = "Keep short notes from the terminal")]
struct Cli {
    /// Config file (defaults to ~/.jotter.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Notes database file; overrides the config file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all notes in order.
    List,
    /// Show one note.
    Show { id: Uuid },
    /// Add a note.
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Replace a note's title and content.
    Edit {
        id: Uuid,
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Flip a note's completion flag.
    Toggle { id: Uuid },
    /// Delete notes by list position.
    Delete {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Print the normalized form of some text.
    Normalize {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

fn main() {
    let result = run(Cli::parse());
    if let Err(err) = &result {
        error!("event=cli_exit module=cli status=error");
        eprintln!("jotter: {err}");
    }
    log::logger().flush();
    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_logging(&config.log_level, &config.log_dir)?;

    let name = command_name(&cli.command);
    info!("event=cli_command module=cli status=start command={name}");
    execute(cli.command, &config)?;
    info!("event=cli_command module=cli status=ok command={name}");
    Ok(())
}

fn execute(command: Command, config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();

    if let Command::Normalize { text } = &command {
        writeln!(out, "{}", TextNormalizer::english().normalize(&text.join(" ")))?;
        return Ok(());
    }

    let conn = open_db(&config.database_path)?;
    let mut store = NoteStore::open(SqlitePreferenceStore::try_new(&conn)?);

    match command {
        Command::List => render::write_note_list(&mut out, store.notes())?,
        Command::Show { id } => {
            let note = store
                .get(id)
                .ok_or_else(|| format!("note not found: {id}"))?;
            render::write_note_detail(&mut out, note)?;
        }
        Command::Add { title, content } => {
            let note = store.add(title, content);
            writeln!(out, "{}", note.id)?;
        }
        Command::Edit { id, title, content } => {
            let note = store.update(id, &title, &content)?;
            writeln!(out, "{} {}", note.id, note.title)?;
        }
        Command::Toggle { id } => {
            let completed = store.toggle_completion(id)?;
            writeln!(out, "{}", if completed { "completed" } else { "reopened" })?;
        }
        Command::Delete { positions } => {
            let removed = store.delete(positions);
            writeln!(out, "deleted {removed}")?;
        }
        Command::Normalize { .. } => {}
    }

    if store.has_unsaved_changes() {
        return Err(format!(
            "changes could not be saved to `{}`",
            config.database_path.display()
        )
        .into());
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::Show { .. } => "show",
        Command::Add { .. } => "add",
        Command::Edit { .. } => "edit",
        Command::Toggle { .. } => "toggle",
        Command::Delete { .. } => "delete",
        Command::Normalize { .. } => "normalize",
    }
}
