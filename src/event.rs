//! event: Edit events, statuses, errors and status messages
//!
//! This contains the Error types, the edit events a document can execute
//! and the status messages handed to the renderer.

use crate::utils::Loc;
use thiserror::Error;

/// Neater error type
pub type Result<T> = std::result::Result<T, Error>;

/// A single edit, as a key press would make it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Insert a byte at a position.
    /// Takes a location and a byte to insert
    Insert(Loc, u8),
    /// Remove the byte before a position, this is what backspace does.
    /// Takes a location and the byte that is expected to be removed.
    Remove(Loc, u8),
    /// Insert a row.
    /// Takes a row index and the contents for the row.
    InsertRow(usize, Vec<u8>),
    /// Remove a row.
    /// Takes a row index and the contents of the row.
    RemoveRow(usize, Vec<u8>),
    /// Break a line at a position, moving the rest onto a new line below
    SplitDown(Loc),
    /// Join the line at a position onto the end of the line above
    SpliceUp(Loc),
}

/// Where an operation left the cursor, when that is worth knowing
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// Nothing further left on this row
    StartOfRow,
    /// Already on the last row
    EndOfDocument,
    /// Already on the first row
    StartOfDocument,
    /// Nothing of note.
    None,
}

/// How loudly a status message should be shown
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message for the status line
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Message {
    pub text: String,
    pub severity: Severity,
}

impl Message {
    pub fn new<S: Into<String>>(severity: Severity, text: S) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Everything that can go wrong in the editing core
#[derive(Debug, Error)]
pub enum Error {
    /// A row or column past the end of the document, callers clamp these
    #[error("Out of range")]
    OutOfRange,
    /// When the program is unable to read or write a file
    #[error("{0}")]
    FileError(#[from] std::io::Error),
    /// Saving an unnamed file
    #[error("No file name for this document")]
    NoFileName,
    /// A search found nothing
    #[error("Pattern not found: {0}")]
    PatternNotFound(String),
    /// Repeating a search before any pattern was given
    #[error("No previous search")]
    NoPreviousSearch,
    /// Pasting with an empty clipboard
    #[error("Nothing to paste")]
    NothingToPaste,
    /// Asking for a recent file that isn't in the list
    #[error("No recent file at index {0}")]
    InvalidRecent(usize),
    /// A command the grammar doesn't know
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    /// The replace prompt needs a `find/replace` pair
    #[error("Usage: find/replace")]
    BadReplace,
    /// Closing the only open document
    #[error("Cannot close the last document (force to override)")]
    LastDocument,
    /// Closing or quitting with modifications
    #[error("No write since last change (force to override)")]
    UnsavedChanges,
    /// Malformed configuration file
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

impl Error {
    /// The severity a status message for this error should carry.
    /// Boundary errors are clamped by callers and never shown.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Error::OutOfRange => None,
            Error::FileError(_) | Error::Config(_) => Some(Severity::Error),
            _ => Some(Severity::Warning),
        }
    }
}
