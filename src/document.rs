//! document: Tools for opening, editing and saving files
//!
//! [Document] is a line store with a cursor, a viewport and the edit
//! operations that keep them consistent. [`FileInfo`] records the file name,
//! line ending and tab width a document was opened with.
//!
//! A document always holds at least one row, and its cursor always sits on an
//! existing row at a column no further right than that row's length.

use crate::event::{Error, Event, Result, Status};
use crate::io::Storage;
use crate::navigate::word_forward_col;
use crate::row::Row;
use crate::st;
use crate::utils::{has_line_break, word_bounds, Loc, Size};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Columns a single indent step moves by
pub const INDENT_WIDTH: usize = 4;
/// Columns kept between the cursor and the edge of the viewport
pub const SCROLL_MARGIN: usize = 10;

/// Where a document came from and how it is laid out on disk
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FileInfo {
    /// Path the document loads from and saves to, `None` until named
    pub file: Option<String>,
    /// Lines end in \r\n on disk
    pub is_dos: bool,
    /// Display width of a tab
    pub tab_width: usize,
}

impl Default for FileInfo {
    fn default() -> Self {
        Self {
            file: None,
            is_dos: false,
            tab_width: 4,
        }
    }
}

/// Which way to change the case of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
    Toggle,
}

/// One open file: its rows, cursor, viewport and modified flag
#[derive(Debug, Clone)]
pub struct Document {
    /// File name and line ending
    pub info: FileInfo,
    /// All the rows within the document, never empty
    pub rows: Vec<Row>,
    /// Boolean that changes when the file is edited
    pub modified: bool,
    /// Viewport size, excluding any gutter or status line
    pub size: Size,
    /// The cursor position within the document (column, row)
    pub cursor: Loc,
    /// Stores information about scrolling, `x` is in display columns
    pub offset: Loc,
    /// The column vertical movement tries to return to
    pub target_x: usize,
    /// Spaces inserted by a single indent
    pub indent_width: usize,
    /// Columns kept between the cursor and the viewport edge
    pub scroll_margin: usize,
}

impl Document {
    /// An unnamed document holding one empty row, viewed through `size`
    pub fn new<S: Into<Size>>(size: S) -> Self {
        Self {
            info: FileInfo::default(),
            rows: vec![Row::default()],
            modified: false,
            size: size.into(),
            cursor: Loc::default(),
            offset: Loc::default(),
            target_x: 0,
            indent_width: INDENT_WIDTH,
            scroll_margin: SCROLL_MARGIN,
        }
    }

    /// Create a document from a list of lines
    pub fn from_lines<S: Into<Size>, B: AsRef<[u8]>>(size: S, lines: &[B]) -> Self {
        let mut doc = Self::new(size);
        doc.set_rows(lines.iter().map(Row::new).collect());
        doc
    }

    /// Load `path` into this document, replacing its rows and resetting the
    /// cursor and viewport. A path that doesn't exist yet opens as an empty
    /// document with that name.
    /// # Errors
    /// Will return `Err` if the file exists but can't be read.
    pub fn open<P: Into<String>>(&mut self, storage: &dyn Storage, path: P) -> Result<()> {
        let path = path.into();
        let mut lines = match storage.read_lines(Path::new(&path)) {
            Ok(lines) => lines,
            Err(Error::FileError(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path, "file not found, opening empty document");
                vec![]
            }
            Err(e) => return Err(e),
        };
        let is_dos = !lines.is_empty() && lines.iter().all(|l| l.ends_with(b"\r"));
        if is_dos {
            lines.iter_mut().for_each(|l| {
                l.pop();
            });
        }
        info!(path = %path, rows = lines.len(), is_dos, "opened document");
        self.info = FileInfo {
            file: Some(path),
            is_dos,
            tab_width: self.info.tab_width,
        };
        self.set_rows(lines.into_iter().map(Row::new).collect());
        Ok(())
    }

    /// Write the rows back to the document's file and clear the modified flags
    /// # Errors
    /// Will return `Err` if the document has no file name or couldn't be written.
    pub fn save(&mut self, storage: &mut dyn Storage) -> Result<()> {
        let file = self.info.file.clone().ok_or(Error::NoFileName)?;
        storage.write_lines(Path::new(&file), &self.lines())?;
        info!(path = %file, rows = self.rows.len(), "saved document");
        self.modified = false;
        self.rows.iter_mut().for_each(|r| r.modified = false);
        Ok(())
    }

    /// Like [save](Document::save), but the document takes on a new name first
    /// # Errors
    /// Will return `Err` if the provided file path wasn't able to be written to.
    pub fn save_as(&mut self, storage: &mut dyn Storage, file: &str) -> Result<()> {
        let previous = self.info.file.replace(st!(file));
        let result = self.save(storage);
        if result.is_err() {
            self.info.file = previous;
        }
        result
    }

    /// The lines as they should be written to storage
    #[must_use]
    pub fn lines(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|r| {
                let mut line = r.text.clone();
                if self.info.is_dos {
                    line.push(b'\r');
                }
                line
            })
            .collect()
    }

    /// Render the document into the form it is saved in
    #[must_use]
    pub fn render(&self) -> String {
        let line_ending = if self.info.is_dos { "\r\n" } else { "\n" };
        self.rows
            .iter()
            .map(Row::render_raw)
            .collect::<Vec<_>>()
            .join(line_ending)
            + line_ending
    }

    /// Apply an [Event](crate::event::Event), leaving the cursor where a user
    /// typing it would expect and marking the document modified.
    /// # Errors
    /// Will return `Err` if the event tried to modify data outside the scope of the
    /// document.
    pub fn execute(&mut self, event: Event) -> Result<Status> {
        match event {
            Event::Insert(loc, ch) => {
                self.goto(loc)?;
                self.insert_char(loc.y, loc.x, ch)?;
                self.goto((loc.x + 1, loc.y))?;
                Ok(Status::None)
            }
            Event::Remove(mut loc, _) => {
                if loc.x == 0 {
                    return Ok(Status::StartOfRow);
                }
                loc.x -= 1;
                self.goto(loc)?;
                self.delete_char(loc.y, loc.x)
            }
            Event::InsertRow(at, text) => {
                if has_line_break(&text) {
                    return Err(Error::OutOfRange);
                }
                let at = self.insert_line(at);
                self.rows[at].insert(0, text)?;
                self.goto((0, at))?;
                Ok(Status::None)
            }
            Event::RemoveRow(at, _) => {
                self.delete_line(at)?;
                Ok(Status::None)
            }
            Event::SpliceUp(loc) => {
                if loc.y == 0 {
                    return Ok(Status::StartOfDocument);
                }
                self.join_line(loc.y - 1)
            }
            Event::SplitDown(loc) => self.split_line(loc.y, loc.x),
        }
    }

    /// Insert an empty line before `at`, or at the end if `at` is past it.
    /// The cursor stays on the line it was on. Returns the index used.
    pub fn insert_line(&mut self, at: usize) -> usize {
        let at = at.min(self.rows.len());
        let mut row = Row::default();
        row.modified = true;
        self.rows.insert(at, row);
        if at <= self.cursor.y {
            self.cursor.y += 1;
        }
        self.modified = true;
        self.reclamp();
        at
    }

    /// Remove a line, handing back what it held.
    /// Removing the only line clears it instead.
    /// # Errors
    /// Will return `Err` if `at` is out of range
    pub fn delete_line(&mut self, at: usize) -> Result<Row> {
        if at >= self.rows.len() {
            return Err(Error::OutOfRange);
        }
        let removed = if self.rows.len() == 1 {
            let mut cleared = Row::default();
            cleared.modified = true;
            std::mem::replace(&mut self.rows[0], cleared)
        } else {
            self.rows.remove(at)
        };
        if at == self.cursor.y {
            self.cursor.y = at.saturating_sub(1);
        } else if at < self.cursor.y {
            self.cursor.y -= 1;
        }
        self.modified = true;
        self.reclamp();
        Ok(removed)
    }

    /// Move everything from `col` onward in `row` to a new line below it
    /// # Errors
    /// Will return `Err` if `row` or `col` is out of range
    pub fn split_line(&mut self, row: usize, col: usize) -> Result<Status> {
        let (left, right) = self.row(row)?.split(col)?;
        self.rows[row] = left;
        self.rows.insert(row + 1, right);
        self.modified = true;
        self.cursor = Loc { x: 0, y: row + 1 };
        self.target_x = 0;
        self.reclamp();
        Ok(Status::None)
    }

    /// Append the line below `row` onto `row`
    /// # Errors
    /// Will return `Err` if `row` is out of range
    pub fn join_line(&mut self, row: usize) -> Result<Status> {
        let x = self.row(row)?.len();
        if row + 1 >= self.rows.len() {
            return Ok(Status::EndOfDocument);
        }
        let lower = self.rows.remove(row + 1);
        self.rows[row].splice(lower);
        self.modified = true;
        self.cursor = Loc { x, y: row };
        self.target_x = x;
        self.reclamp();
        Ok(Status::None)
    }

    /// Insert a byte into a row
    /// # Errors
    /// Will return `Err` if `row` or `col` is out of range
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) -> Result<Status> {
        self.row_mut(row)?.insert(col, [ch])?;
        self.modified = true;
        Ok(Status::None)
    }

    /// Remove the byte at a position in a row
    /// # Errors
    /// Will return `Err` if `row` or `col` is out of range
    pub fn delete_char(&mut self, row: usize, col: usize) -> Result<Status> {
        self.row_mut(row)?.remove(col..col + 1)?;
        self.modified = true;
        self.reclamp();
        Ok(Status::None)
    }

    /// Split at the cursor, seeding the new line with the indentation of the
    /// line above plus one step if that line opens a block
    /// # Errors
    /// Will return `Err` if the cursor is out of range
    pub fn new_line(&mut self, auto_indent: bool) -> Result<Status> {
        let Loc { x, y } = self.cursor;
        self.split_line(y, x)?;
        if auto_indent {
            let above = &self.rows[y];
            let mut indent = above.text[..above.indent()].to_vec();
            if above.opens_block() {
                indent.extend(std::iter::repeat(b' ').take(self.indent_width));
            }
            let len = indent.len();
            self.rows[y + 1].insert(0, indent)?;
            self.cursor.x = len;
            self.target_x = len;
        }
        Ok(Status::None)
    }

    /// Shift the current line right by one indent step
    pub fn indent(&mut self) {
        let width = self.indent_width;
        let y = self.cursor.y;
        self.rows[y].text.splice(0..0, std::iter::repeat(b' ').take(width));
        self.rows[y].modified = true;
        self.cursor.x += width;
        self.target_x = self.cursor.x;
        self.modified = true;
    }

    /// Shift the current line left by at most one indent step,
    /// only ever removing spaces that are there
    pub fn unindent(&mut self) -> usize {
        let y = self.cursor.y;
        let spaces = self.rows[y]
            .text
            .iter()
            .take(self.indent_width)
            .take_while(|b| **b == b' ')
            .count();
        if spaces > 0 {
            self.rows[y].text.drain(..spaces);
            self.rows[y].modified = true;
            self.cursor.x = self.cursor.x.saturating_sub(spaces);
            self.target_x = self.cursor.x;
            self.modified = true;
        }
        spaces
    }

    /// Delete from the cursor up to the start of the next word on this line
    pub fn delete_word(&mut self) -> Vec<u8> {
        let Loc { x, y } = self.cursor;
        let end = word_forward_col(&self.rows[y].text, x);
        if end <= x {
            return vec![];
        }
        let removed = self.rows[y].text.drain(x..end).collect();
        self.rows[y].modified = true;
        self.modified = true;
        self.reclamp();
        removed
    }

    /// Change the case of the word under the cursor
    pub fn change_case(&mut self, case: Case) -> bool {
        let y = self.cursor.y;
        let Some(bounds) = word_bounds(&self.rows[y].text, self.cursor.x) else {
            return false;
        };
        for byte in &mut self.rows[y].text[bounds] {
            *byte = match case {
                Case::Upper => byte.to_ascii_uppercase(),
                Case::Lower => byte.to_ascii_lowercase(),
                Case::Toggle if byte.is_ascii_uppercase() => byte.to_ascii_lowercase(),
                Case::Toggle => byte.to_ascii_uppercase(),
            };
        }
        self.rows[y].modified = true;
        self.modified = true;
        true
    }

    /// Swap the byte under the cursor with the one after it
    pub fn transpose(&mut self) -> bool {
        let Loc { x, y } = self.cursor;
        if x + 1 >= self.rows[y].len() {
            return false;
        }
        self.rows[y].text.swap(x, x + 1);
        self.rows[y].modified = true;
        self.cursor.x = x + 1;
        self.target_x = x + 1;
        self.modified = true;
        true
    }

    /// Place the cursor at a column and row
    /// # Errors
    /// Will return `Err` if the row doesn't exist or the column is past its end
    pub fn goto<L: Into<Loc>>(&mut self, loc: L) -> Result<()> {
        let loc = loc.into();
        self.goto_y(loc.y)?;
        self.goto_x(loc.x)?;
        Ok(())
    }

    /// Place the cursor at a column of the current row
    /// # Errors
    /// Will return `Err` if the column is past the end of the row
    pub fn goto_x(&mut self, x: usize) -> Result<()> {
        if x > self.current_row().len() {
            return Err(Error::OutOfRange);
        }
        self.cursor.x = x;
        self.target_x = x;
        self.scroll();
        Ok(())
    }

    /// Place the cursor on a row, snapping the column to the row's length
    /// # Errors
    /// Will return `Err` if the row doesn't exist
    pub fn goto_y(&mut self, y: usize) -> Result<()> {
        if y >= self.rows.len() {
            return Err(Error::OutOfRange);
        }
        self.cursor.y = y;
        self.reclamp();
        Ok(())
    }

    /// Force the cursor back onto an existing row and column
    pub fn clamp(&mut self) {
        if self.rows.is_empty() {
            self.rows.push(Row::default());
        }
        self.cursor.y = self.cursor.y.min(self.rows.len() - 1);
        self.cursor.x = self.cursor.x.min(self.rows[self.cursor.y].len());
    }

    /// Recompute the scroll offsets so the cursor stays within the viewport
    pub fn scroll(&mut self) {
        if self.cursor.y < self.offset.y {
            self.offset.y = self.cursor.y;
        } else if self.size.h > 0 && self.cursor.y >= self.offset.y + self.size.h {
            self.offset.y = self.cursor.y + 1 - self.size.h;
        }
        let w = self.size.w;
        if w == 0 {
            return;
        }
        let margin = self.scroll_margin.min(w.saturating_sub(1) / 2);
        let col = self.display_x();
        if col < self.offset.x + margin {
            self.offset.x = col.saturating_sub(margin);
        } else if col + margin >= self.offset.x + w {
            self.offset.x = col + margin + 1 - w;
        }
    }

    /// Clamp the cursor then bring it into view
    pub fn reclamp(&mut self) {
        self.clamp();
        self.scroll();
    }

    /// Replace every row, resetting cursor, scroll and modified state
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = if rows.is_empty() {
            vec![Row::default()]
        } else {
            rows
        };
        self.cursor = Loc::default();
        self.offset = Loc::default();
        self.target_x = 0;
        self.modified = false;
    }

    /// The range of rows currently within the viewport
    #[must_use]
    pub fn visible_rows(&self) -> Range<usize> {
        let start = self.offset.y.min(self.rows.len());
        start..(self.offset.y + self.size.h).min(self.rows.len())
    }

    /// Gutter text for a row, right aligned to the widest line number
    #[must_use]
    pub fn line_number(&self, row: usize) -> String {
        let total = self.rows.len().to_string().len();
        let num = (row + 1).to_string();
        format!("{}{}", " ".repeat(total.saturating_sub(num.len())), num)
    }

    /// Width of the line number gutter, including a separating space
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        self.rows.len().to_string().len() + 1
    }

    /// Fields for a status line, keyed by `row` (1-based), `column`, `total`,
    /// `file`, `full_file`, `modified` (`[+]` or empty) and `extension`
    #[must_use]
    pub fn status_line_info(&self) -> HashMap<&str, String> {
        let modified = if self.modified { "[+]" } else { "" };
        let (full_file, file, ext) = if let Some(name) = &self.info.file {
            let path = Path::new(name);
            let f = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or(name)
                .to_string();
            let e = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            (name.clone(), f, e)
        } else {
            (st!("[No Name]"), st!("[No Name]"), st!(""))
        };
        let mut info = HashMap::new();
        info.insert("row", st!(self.cursor.y + 1));
        info.insert("column", st!(self.cursor.x));
        info.insert("total", st!(self.rows.len()));
        info.insert("file", file);
        info.insert("full_file", full_file);
        info.insert("modified", st!(modified));
        info.insert("extension", ext);
        info
    }

    /// Borrow a row
    /// # Errors
    /// Will return `Err` if there is no row at `index`
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows.get(index).ok_or(Error::OutOfRange)
    }

    /// Mutably borrow a row
    /// # Errors
    /// Will return `Err` if there is no row at `index`
    pub fn row_mut(&mut self, index: usize) -> Result<&mut Row> {
        self.rows.get_mut(index).ok_or(Error::OutOfRange)
    }

    /// Get the row the cursor is on
    #[must_use]
    pub fn current_row(&self) -> &Row {
        &self.rows[self.cursor.y]
    }

    /// The display column the cursor sits at, before scrolling
    #[must_use]
    pub fn display_x(&self) -> usize {
        self.rows
            .get(self.cursor.y)
            .map_or(0, |r| r.display_col(self.cursor.x, self.info.tab_width))
    }

    /// Get the current position in the document as byte column and row
    #[must_use]
    pub const fn loc(&self) -> Loc {
        self.cursor
    }

    /// Get the position of the cursor within the viewport
    #[must_use]
    pub fn screen_loc(&self) -> Loc {
        Loc {
            x: self.display_x().saturating_sub(self.offset.x),
            y: self.cursor.y.saturating_sub(self.offset.y),
        }
    }
}
