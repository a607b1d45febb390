use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    render_tbody_html, Escaper, RosterCommand, RosterController, RosterEvent, TerminalEscaper,
};
use shared::domain::{SortMode, StudentId};
use storage::{FileStorage, RecordStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod output;
mod shell;

use crate::config::{data_file_override, load_settings, Settings, SETTINGS_FILE};
use output::rows_table;

#[derive(Parser, Debug)]
#[command(name = "roster", version, about = "Manage a local student roster")]
struct Cli {
    /// Storage file holding the roster slot.
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    /// Settings file; missing is fine.
    #[arg(long, global = true, default_value = SETTINGS_FILE)]
    settings: PathBuf,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show students, optionally filtered and re-sorted.
    List {
        #[arg(long)]
        search: Option<String>,
        /// Changing the sort mode also saves the new order.
        #[arg(long)]
        sort: Option<SortMode>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        age: String,
        #[arg(long)]
        email: String,
    },
    /// Change some fields of a student; the rest keep their current values.
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Re-sort the stored roster.
    Sort { mode: SortMode },
    /// Print the effective settings.
    Config,
    /// Interactive session.
    Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut settings = load_settings(&cli.settings)?;
    if let Some(path) = &cli.data_file {
        settings.data_file = data_file_override(path);
    }

    let mut controller = open_roster(&settings);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List {
            search,
            sort,
            format,
        } => {
            if let Some(mode) = sort {
                controller.dispatch(RosterCommand::SetSort(mode));
            }
            if let Some(query) = search {
                controller.dispatch(RosterCommand::Search(query));
            }
            match format {
                OutputFormat::Table => writeln!(out, "{}", rows_table(&controller.rows()))?,
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&controller.visible())?)?
                }
                OutputFormat::Html => write!(
                    out,
                    "{}",
                    render_tbody_html(controller.records(), controller.query())
                )?,
            }
        }
        Command::Add { name, age, email } => {
            controller.dispatch(RosterCommand::SetName(name));
            controller.dispatch(RosterCommand::SetAge(age));
            controller.dispatch(RosterCommand::SetEmail(email));
            submit(&mut controller, &mut out)?;
        }
        Command::Edit {
            id,
            name,
            age,
            email,
        } => {
            let id = StudentId::from(id.as_str());
            if controller.dispatch(RosterCommand::StartEdit(id.clone())).is_empty() {
                warn!(%id, "edit ignored: no such student");
                writeln!(out, "no student with id {id}")?;
                return Ok(());
            }
            if let Some(name) = name {
                controller.dispatch(RosterCommand::SetName(name));
            }
            if let Some(age) = age {
                controller.dispatch(RosterCommand::SetAge(age));
            }
            if let Some(email) = email {
                controller.dispatch(RosterCommand::SetEmail(email));
            }
            submit(&mut controller, &mut out)?;
        }
        Command::Delete { id, yes } => {
            let id = StudentId::from(id.as_str());
            let events = controller.dispatch(RosterCommand::RequestDelete(id.clone()));
            let Some(RosterEvent::ConfirmationRequested { prompt, .. }) = events.into_iter().next()
            else {
                writeln!(out, "no student with id {id}")?;
                return Ok(());
            };

            let confirmed = yes || ask_confirmation(&prompt)?;
            if confirmed {
                controller.dispatch(RosterCommand::ConfirmDelete);
                writeln!(out, "deleted {id}")?;
            } else {
                controller.dispatch(RosterCommand::CancelDelete);
                writeln!(out, "delete cancelled")?;
            }
        }
        Command::Sort { mode } => {
            controller.dispatch(RosterCommand::SetSort(mode));
            writeln!(out, "{}", rows_table(&controller.rows()))?;
        }
        Command::Config => {
            let rendered = toml::to_string_pretty(&settings).context("failed to render settings")?;
            write!(out, "{rendered}")?;
        }
        Command::Shell => {
            let stdin = io::stdin();
            shell::run(&mut controller, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_roster(settings: &Settings) -> RosterController<FileStorage> {
    info!(
        data_file = %settings.data_file.display(),
        key = %settings.storage_key,
        "opening roster"
    );
    let store = RecordStore::load(
        FileStorage::new(&settings.data_file),
        settings.storage_key.as_str(),
    );
    info!(
        key = store.key(),
        source = ?store.source(),
        records = store.len(),
        "roster loaded"
    );
    RosterController::new(store, settings.default_sort).with_escaper(TerminalEscaper)
}

/// Submits the form; a validation alert becomes the command's error.
fn submit<W: Write>(controller: &mut RosterController<FileStorage>, out: &mut W) -> Result<()> {
    for event in controller.dispatch(RosterCommand::Submit) {
        match event {
            RosterEvent::Alert(error) => bail!(error),
            RosterEvent::Saved { id, created } => {
                let verb = if created { "added" } else { "updated" };
                writeln!(out, "{verb} {id}")?;
            }
            RosterEvent::Rendered(rows) => writeln!(out, "{}", rows_table(&rows))?,
            RosterEvent::FormChanged(_) | RosterEvent::ConfirmationRequested { .. } => {}
        }
    }
    Ok(())
}

fn ask_confirmation(prompt: &str) -> Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{} [y/N] ", TerminalEscaper.escape(prompt))?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
