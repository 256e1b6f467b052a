//! command: Parsing and running `:` commands

use crate::dispatch::Outcome;
use crate::editor::Editor;
use crate::event::{Error, Result};

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Write to the current file
    Write,
    /// Write to a specified path
    WriteAs(String),
    /// Write then quit
    WriteQuit,
    /// Open a file
    Edit(String),
    /// Start an empty document
    New,
    Quit { force: bool },
    Close { force: bool },
    NextDocument,
    PrevDocument,
    ToggleLineNumbers,
    ToggleAutoIndent,
    ToggleHighlighting,
    /// Open a recent file by index
    Recent(usize),
    /// Replace every occurrence in the document
    ReplaceAll(String, String),
    /// Jump to a 1-based line
    Goto(usize),
    Unknown(String),
}

/// Parse command text, without the leading ':'
pub fn parse_command(text: &str) -> Command {
    let trimmed = text.trim();
    match trimmed {
        "w" => Command::Write,
        "wq" | "x" => Command::WriteQuit,
        "q" => Command::Quit { force: false },
        "q!" => Command::Quit { force: true },
        "new" => Command::New,
        "close" => Command::Close { force: false },
        "close!" => Command::Close { force: true },
        "bn" => Command::NextDocument,
        "bp" => Command::PrevDocument,
        "set number" | "set nu" => Command::ToggleLineNumbers,
        "set autoindent" | "set ai" => Command::ToggleAutoIndent,
        "set highlight" | "set hl" => Command::ToggleHighlighting,
        _ if trimmed.starts_with("w ") => Command::WriteAs(trimmed[2..].trim().into()),
        _ if trimmed.starts_with("e ") => Command::Edit(trimmed[2..].trim().into()),
        _ if trimmed.starts_with("recent ") => match trimmed[7..].trim().parse() {
            Ok(idx) => Command::Recent(idx),
            Err(_) => Command::Unknown(trimmed.into()),
        },
        _ if trimmed.starts_with("%s/") => {
            let parts: Vec<&str> = trimmed[3..].split('/').collect();
            match parts.as_slice() {
                [find, with] | [find, with, "" | "g"] if !find.is_empty() => {
                    Command::ReplaceAll((*find).into(), (*with).into())
                }
                _ => Command::Unknown(trimmed.into()),
            }
        }
        _ => match trimmed.parse() {
            Ok(line) => Command::Goto(line),
            Err(_) => Command::Unknown(trimmed.into()),
        },
    }
}

impl Editor {
    /// Parse and run a command against the session
    /// # Errors
    /// Will return `Err` if the command is unknown or the operation it maps to fails
    pub fn run_command(&mut self, text: &str) -> Result<Outcome> {
        match parse_command(text) {
            Command::Write => self.save()?,
            Command::WriteAs(path) => self.save_as(&path)?,
            Command::WriteQuit => {
                self.save()?;
                self.quit(false)?;
                return Ok(Outcome::Quit);
            }
            Command::Edit(path) => self.open(&path)?,
            Command::New => self.new_document(),
            Command::Quit { force } => {
                self.quit(force)?;
                return Ok(Outcome::Quit);
            }
            Command::Close { force } => self.close(force)?,
            Command::NextDocument => self.next_document(),
            Command::PrevDocument => self.prev_document(),
            Command::ToggleLineNumbers => {
                self.toggle_line_numbers();
            }
            Command::ToggleAutoIndent => {
                self.toggle_auto_indent();
            }
            Command::ToggleHighlighting => {
                self.toggle_highlighting();
            }
            Command::Recent(idx) => self.open_recent(idx)?,
            Command::ReplaceAll(find, with) => {
                self.replace_all(find.as_bytes(), with.as_bytes());
            }
            Command::Goto(line) => self.goto_line(line),
            Command::Unknown(text) => return Err(Error::UnknownCommand(text)),
        }
        Ok(Outcome::Continue)
    }
}
