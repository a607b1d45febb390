//! Line-oriented session that drives the controller the way the roster page does.

use std::io::{BufRead, Write};

use anyhow::Result;
use client_core::{Escaper, RosterCommand, RosterController, RosterEvent, TerminalEscaper};
use shared::domain::{SortMode, StudentId};
use storage::{KeyValueStore, LoadSource};

use crate::output::{form_line, rows_table};

const HELP: &str = "\
commands:
  list                  show the roster
  search <text>         filter by name or email (empty clears)
  sort <name|age|email> re-sort and save
  name|age|email <text> fill in a form field
  submit                add, or update the student being edited
  edit <id>             load a student into the form
  cancel                abandon the current edit
  delete <id>           delete a student (asks for confirmation)
  help                  this text
  quit                  leave the shell";

pub fn run<S, R, W>(controller: &mut RosterController<S>, input: R, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    if controller.store().source() == LoadSource::SeedRecovered {
        writeln!(
            out,
            "! saved roster under '{}' was unreadable; starting from the seed students",
            controller.store().key()
        )?;
    }
    writeln!(out, "{}", rows_table(&controller.rows()))?;
    writeln!(out, "type 'help' for commands")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));

        if controller.pending_delete().is_some() {
            let command = match word.to_ascii_lowercase().as_str() {
                "quit" | "exit" => {
                    controller.dispatch(RosterCommand::CancelDelete);
                    writeln!(out, "delete cancelled")?;
                    break;
                }
                "y" | "yes" => RosterCommand::ConfirmDelete,
                "n" | "no" => RosterCommand::CancelDelete,
                _ => {
                    writeln!(out, "answer yes or no (or quit)")?;
                    continue;
                }
            };
            let cancelled = matches!(command, RosterCommand::CancelDelete);
            print_events(out, controller.dispatch(command))?;
            if cancelled {
                writeln!(out, "delete cancelled")?;
            }
            continue;
        }

        let command = match word {
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            "list" => {
                writeln!(out, "{}", rows_table(&controller.rows()))?;
                continue;
            }
            "search" => RosterCommand::Search(rest.to_string()),
            "sort" => match rest.parse::<SortMode>() {
                Ok(mode) => RosterCommand::SetSort(mode),
                Err(err) => {
                    writeln!(out, "! {err}")?;
                    continue;
                }
            },
            "name" => RosterCommand::SetName(rest.to_string()),
            "age" => RosterCommand::SetAge(rest.to_string()),
            "email" => RosterCommand::SetEmail(rest.to_string()),
            "submit" => RosterCommand::Submit,
            "cancel" => RosterCommand::CancelEdit,
            "edit" | "delete" if rest.is_empty() => {
                writeln!(out, "! {word} needs a student id")?;
                continue;
            }
            "edit" => RosterCommand::StartEdit(StudentId::from(rest)),
            "delete" => RosterCommand::RequestDelete(StudentId::from(rest)),
            other => {
                writeln!(out, "! unknown command '{}'", TerminalEscaper.escape(other))?;
                continue;
            }
        };

        let events = controller.dispatch(command);
        if events.is_empty() {
            writeln!(out, "no student with id {}", TerminalEscaper.escape(rest))?;
        }
        print_events(out, events)?;
    }

    Ok(())
}

fn print_events<W: Write>(out: &mut W, events: Vec<RosterEvent>) -> Result<()> {
    for event in events {
        match event {
            RosterEvent::Alert(error) => writeln!(out, "! {error}")?,
            RosterEvent::Saved { id, created } => {
                let verb = if created { "added" } else { "updated" };
                writeln!(out, "{verb} {id}")?;
            }
            RosterEvent::FormChanged(view) => writeln!(out, "{}", form_line(&view))?,
            RosterEvent::ConfirmationRequested { prompt, .. } => {
                writeln!(out, "{} [yes/no]", TerminalEscaper.escape(&prompt))?;
            }
            RosterEvent::Rendered(rows) => writeln!(out, "{}", rows_table(&rows))?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
