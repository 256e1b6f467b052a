//! editor: The editing session
//!
//! An [Editor] owns every open [Document], the clipboard, the last search,
//! the recent files list and the current mode. The operations in here are the
//! named operations a command grammar or key binding maps onto.

use crate::config::Config;
use crate::document::Document;
use crate::event::{Error, Message, Result, Severity};
use crate::io::{FileSystem, Storage};
use crate::mode::{Mode, Prefix};
use crate::row::Row;
use crate::utils::{Loc, Size};
use tracing::{debug, info, warn};

/// A modal editing session over one or more documents
pub struct Editor {
    /// Every open document, never empty
    pub docs: Vec<Document>,
    /// Index of the document being edited
    pub active: usize,
    /// How input is currently interpreted
    pub mode: Mode,
    /// The mode before the last transition
    pub previous_mode: Mode,
    /// Copied lines, the most recent copy wins
    pub clipboard: Vec<Row>,
    /// The pattern `n` and `N` repeat
    pub last_search: Vec<u8>,
    /// Scratch text typed into the Command, Search or Replace prompt
    pub prompt: Vec<u8>,
    /// A Normal mode prefix key waiting for its second key
    pub pending: Option<Prefix>,
    /// Transient message for the status line
    pub message: Option<Message>,
    /// Recently opened files, most recent first
    pub recent: Vec<String>,
    pub config: Config,
    /// Space available for documents, including the line number gutter
    pub size: Size,
    storage: Box<dyn Storage>,
}

impl Editor {
    /// Create a session with one empty document, backed by the file system
    pub fn new<S: Into<Size>>(config: Config, size: S) -> Self {
        Self::with_storage(config, size, Box::new(FileSystem))
    }

    /// Create a session with one empty document and a custom storage backend
    pub fn with_storage<S: Into<Size>>(
        config: Config,
        size: S,
        storage: Box<dyn Storage>,
    ) -> Self {
        let mut editor = Self {
            docs: vec![],
            active: 0,
            mode: Mode::Normal,
            previous_mode: Mode::Normal,
            clipboard: vec![],
            last_search: vec![],
            prompt: vec![],
            pending: None,
            message: None,
            recent: vec![],
            config,
            size: size.into(),
            storage,
        };
        let doc = editor.blank();
        editor.docs.push(doc);
        editor
    }

    /// The document being edited
    #[must_use]
    pub fn doc(&self) -> &Document {
        &self.docs[self.active]
    }

    /// The document being edited
    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.docs[self.active]
    }

    /// The storage documents are read from and written to
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Current status message, if any
    #[must_use]
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Width of the line number gutter, zero when line numbers are hidden
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        if self.config.line_numbers {
            self.doc().gutter_width()
        } else {
            0
        }
    }

    /// Where the cursor should be drawn on screen, gutter included
    #[must_use]
    pub fn cursor_screen(&self) -> Loc {
        let loc = self.doc().screen_loc();
        Loc {
            x: loc.x + self.gutter_width(),
            y: loc.y,
        }
    }

    /// Switch modes, clearing the prompt when entering a mode that types text
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Insert || mode.is_prompt() {
            self.prompt.clear();
        }
        debug!(from = self.mode.as_str(), to = mode.as_str(), "mode change");
        self.previous_mode = self.mode;
        self.mode = mode;
    }

    /// Show a message on the status line
    pub fn notify<S: Into<String>>(&mut self, severity: Severity, text: S) {
        self.message = Some(Message::new(severity, text));
    }

    /// Turn an error into a status message, boundary errors stay silent
    pub fn report(&mut self, error: &Error) {
        if let Some(severity) = error.severity() {
            self.notify(severity, error.to_string());
        }
    }

    /// Keep the active document's viewport in line with the session size
    pub fn sync_size(&mut self) {
        self.active = self.active.min(self.docs.len() - 1);
        let gutter = self.gutter_width();
        let size = Size {
            w: self.size.w.saturating_sub(gutter),
            h: self.size.h,
        };
        self.doc_mut().size = size;
    }

    /// A fresh document carrying the session settings
    fn blank(&self) -> Document {
        let mut doc = Document::new(self.size);
        doc.info.tab_width = self.config.tab_width;
        doc.indent_width = self.config.indent_width;
        doc.scroll_margin = self.config.scroll_margin;
        doc
    }

    fn remember(&mut self, path: &str) {
        self.recent.retain(|p| p != path);
        self.recent.insert(0, path.to_string());
        self.recent.truncate(self.config.recent_limit);
    }

    /// Save the active document to its file
    /// # Errors
    /// Will return `Err` if the document has no name or can't be written
    pub fn save(&mut self) -> Result<()> {
        let doc = &mut self.docs[self.active];
        doc.save(self.storage.as_mut())?;
        let name = doc.info.file.clone().unwrap_or_default();
        let rows = doc.rows.len();
        self.notify(Severity::Success, format!("Saved {} ({} lines)", name, rows));
        Ok(())
    }

    /// Save the active document under a new name
    /// # Errors
    /// Will return `Err` if the file can't be written
    pub fn save_as(&mut self, path: &str) -> Result<()> {
        let doc = &mut self.docs[self.active];
        doc.save_as(self.storage.as_mut(), path)?;
        let rows = doc.rows.len();
        self.remember(path);
        self.notify(Severity::Success, format!("Saved {} ({} lines)", path, rows));
        Ok(())
    }

    /// Open a file in a new document, or switch to it if it's already open
    /// # Errors
    /// Will return `Err` if the file exists but can't be read
    pub fn open(&mut self, path: &str) -> Result<()> {
        if let Some(idx) = self
            .docs
            .iter()
            .position(|d| d.info.file.as_deref() == Some(path))
        {
            self.active = idx;
            self.remember(path);
            return Ok(());
        }
        let mut doc = self.blank();
        doc.open(self.storage.as_ref(), path)?;
        self.docs.push(doc);
        self.active = self.docs.len() - 1;
        self.remember(path);
        self.notify(Severity::Info, format!("Opened {}", path));
        Ok(())
    }

    /// Open one of the recent files by its position in the list
    /// # Errors
    /// Will return `Err` if there is no recent file at `idx`
    pub fn open_recent(&mut self, idx: usize) -> Result<()> {
        let path = self.recent.get(idx).cloned().ok_or(Error::InvalidRecent(idx))?;
        self.open(&path)
    }

    /// Start a new, unnamed document
    pub fn new_document(&mut self) {
        let doc = self.blank();
        self.docs.push(doc);
        self.active = self.docs.len() - 1;
    }

    /// Close the active document.
    /// Without `force`, unsaved changes and the last open document are
    /// refused. Force closing the last document leaves a fresh empty one.
    /// # Errors
    /// Will return `Err` when the close is refused
    pub fn close(&mut self, force: bool) -> Result<()> {
        if !force && self.doc().modified {
            warn!("refusing to close a modified document");
            return Err(Error::UnsavedChanges);
        }
        if self.docs.len() == 1 {
            if !force {
                warn!("refusing to close the last document");
                return Err(Error::LastDocument);
            }
            self.docs[0] = self.blank();
        } else {
            self.docs.remove(self.active);
            self.active = self.active.min(self.docs.len() - 1);
        }
        info!(remaining = self.docs.len(), "closed document");
        Ok(())
    }

    /// Check whether the session may end
    /// # Errors
    /// Will return `Err` if any document has unsaved changes and `force` isn't set
    pub fn quit(&self, force: bool) -> Result<()> {
        if !force && self.docs.iter().any(|d| d.modified) {
            warn!("refusing to quit with unsaved changes");
            return Err(Error::UnsavedChanges);
        }
        Ok(())
    }

    /// Move to the next document, wrapping around
    pub fn next_document(&mut self) {
        self.active = (self.active + 1) % self.docs.len();
    }

    /// Move to the previous document, wrapping around
    pub fn prev_document(&mut self) {
        self.active = (self.active + self.docs.len() - 1) % self.docs.len();
    }

    pub fn toggle_line_numbers(&mut self) -> bool {
        self.config.line_numbers = !self.config.line_numbers;
        self.toggled("Line numbers", self.config.line_numbers)
    }

    pub fn toggle_auto_indent(&mut self) -> bool {
        self.config.auto_indent = !self.config.auto_indent;
        self.toggled("Auto-indent", self.config.auto_indent)
    }

    pub fn toggle_highlighting(&mut self) -> bool {
        self.config.highlighting = !self.config.highlighting;
        self.toggled("Highlighting", self.config.highlighting)
    }

    fn toggled(&mut self, what: &str, on: bool) -> bool {
        let state = if on { "on" } else { "off" };
        self.notify(Severity::Info, format!("{} {}", what, state));
        on
    }

    /// Copy the current line to the clipboard
    pub fn yank_line(&mut self) {
        let mut row = self.doc().current_row().clone();
        row.modified = false;
        self.clipboard = vec![row];
    }

    /// Delete the current line, keeping it in the clipboard
    /// # Errors
    /// Will return `Err` if the cursor is out of range
    pub fn delete_line(&mut self) -> Result<()> {
        let y = self.doc().cursor.y;
        let mut row = self.doc_mut().delete_line(y)?;
        row.modified = false;
        self.clipboard = vec![row];
        Ok(())
    }

    /// Paste the clipboard lines below (or above) the current line
    /// # Errors
    /// Will return `Err` if the clipboard is empty
    pub fn paste(&mut self, below: bool) -> Result<()> {
        if self.clipboard.is_empty() {
            return Err(Error::NothingToPaste);
        }
        let lines = self.clipboard.clone();
        let doc = &mut self.docs[self.active];
        let at = doc.cursor.y + usize::from(below);
        for (i, row) in lines.into_iter().enumerate() {
            let idx = doc.insert_line(at + i);
            doc.rows[idx].text = row.text;
        }
        doc.goto((0, at))?;
        Ok(())
    }

    /// Search for a pattern and remember it for repeats
    /// # Errors
    /// Will return `Err` if the pattern isn't found
    pub fn search(&mut self, pattern: Vec<u8>, forward: bool) -> Result<Loc> {
        self.last_search = pattern;
        self.repeat_search(forward)
    }

    /// Repeat the last search
    /// # Errors
    /// Will return `Err` if the pattern isn't found or nothing was searched yet
    pub fn repeat_search(&mut self, forward: bool) -> Result<Loc> {
        if self.last_search.is_empty() {
            return Err(Error::NoPreviousSearch);
        }
        let pattern = self.last_search.clone();
        let doc = &mut self.docs[self.active];
        if forward {
            doc.search_forward(&pattern)
        } else {
            doc.search_backward(&pattern)
        }
    }

    /// Replace the next match on the current line
    /// # Errors
    /// Will return `Err` if there is no match on the line from the cursor onward
    pub fn replace(&mut self, pattern: &[u8], with: &[u8]) -> Result<()> {
        self.doc_mut().replace_once(pattern, with)?;
        self.notify(Severity::Success, "Replaced 1 occurrence");
        Ok(())
    }

    /// Replace every match in the active document
    pub fn replace_all(&mut self, pattern: &[u8], with: &[u8]) -> usize {
        let count = self.doc_mut().replace_all(pattern, with);
        let severity = if count == 0 {
            Severity::Warning
        } else {
            Severity::Success
        };
        self.notify(severity, format!("Replaced {} occurrences", count));
        count
    }

    /// Jump to a 1-based line number, clamped to the document
    pub fn goto_line(&mut self, line: usize) {
        let doc = self.doc_mut();
        doc.cursor.y = line.saturating_sub(1).min(doc.rows.len() - 1);
        doc.cursor.x = 0;
        doc.target_x = 0;
        doc.reclamp();
    }
}
