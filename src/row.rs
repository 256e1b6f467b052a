//! row: Tools for inserting and removing bytes
//!
//! A [Row] is one line of a document: raw bytes with no trailing newline,
//! plus the queries the navigator, tokenizer and renderer ask of a line.

use crate::event::{Error, Result, Status};
use crate::token::Tokens;
use crate::utils::{has_line_break, leading_whitespace, width, width_char, WHITESPACE};

/// One line of text
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Row {
    /// Line content, never containing a newline
    pub text: Vec<u8>,
    /// Set by any edit since the row was loaded or saved
    /// ```
    /// use feldspar::row::Row;
    /// let mut row = Row::new("Hello");
    /// assert_eq!(row.modified, false);
    /// row.insert(5, ", world!").unwrap();
    /// assert_eq!(row.modified, true);
    /// ```
    pub modified: bool,
}

impl Row {
    pub fn new<B: AsRef<[u8]>>(raw: B) -> Self {
        Self {
            text: raw.as_ref().to_vec(),
            modified: false,
        }
    }

    /// Insert bytes at a position
    /// # Errors
    /// Will return `Err` if `start` is past the end of the row or `text` holds a line break
    pub fn insert<B: AsRef<[u8]>>(&mut self, start: usize, text: B) -> Result<Status> {
        if start > self.len() || has_line_break(text.as_ref()) {
            return Err(Error::OutOfRange);
        }
        self.text.splice(start..start, text.as_ref().iter().copied());
        self.modified = true;
        Ok(Status::None)
    }

    /// Remove bytes in a range
    /// # Errors
    /// Will return `Err` if `range` reaches past the end of the row
    pub fn remove(&mut self, range: std::ops::Range<usize>) -> Result<Status> {
        if range.start > range.end || range.end > self.len() {
            return Err(Error::OutOfRange);
        }
        self.text.drain(range);
        self.modified = true;
        Ok(Status::None)
    }

    /// Cut the row at `idx` into a prefix and a suffix, both marked modified
    /// # Errors
    /// Will return `Err` if `idx` is past the end of the row
    pub fn split(&self, idx: usize) -> Result<(Row, Row)> {
        let left = self.text.get(..idx).ok_or(Error::OutOfRange)?;
        let right = self.text.get(idx..).ok_or(Error::OutOfRange)?;
        let mut left = Row::new(left);
        left.modified = true;
        let mut right = Row::new(right);
        right.modified = true;
        Ok((left, right))
    }

    /// Joins another row onto the end of this one
    pub fn splice(&mut self, mut row: Row) {
        self.text.append(&mut row.text);
        self.modified = true;
    }

    /// Replace a range with new bytes, growing the row if needed
    /// # Errors
    /// Will return `Err` if `range` reaches past the end of the row
    pub fn replace<B: AsRef<[u8]>>(&mut self, range: std::ops::Range<usize>, with: B) -> Result<Status> {
        if range.start > range.end || range.end > self.len() || has_line_break(with.as_ref()) {
            return Err(Error::OutOfRange);
        }
        self.text.splice(range, with.as_ref().iter().copied());
        self.modified = true;
        Ok(Status::None)
    }

    /// Start of every whitespace separated run, followed by the row length
    /// ```
    /// use feldspar::row::Row;
    /// let row = Row::new("The quick brown fox");
    /// assert_eq!(row.words(), vec![0, 4, 10, 16, 19]);
    /// ```
    #[must_use]
    pub fn words(&self) -> Vec<usize> {
        let mut result = vec![];
        let mut idx = 0;
        while idx < self.len() {
            if WHITESPACE.contains(&self.text[idx]) {
                idx += 1;
                continue;
            }
            // Start of a run of text, skip to the next whitespace
            result.push(idx);
            while idx < self.len() && !WHITESPACE.contains(&self.text[idx]) {
                idx += 1;
            }
        }
        result.push(self.len());
        result
    }

    /// Number of leading spaces and tabs
    #[must_use]
    pub fn indent(&self) -> usize {
        leading_whitespace(&self.text)
    }

    /// True if the last non-whitespace byte opens a brace
    #[must_use]
    pub fn opens_block(&self) -> bool {
        self.text
            .iter()
            .rev()
            .find(|b| !WHITESPACE.contains(b))
            .map_or(false, |b| *b == b'{')
    }

    /// Stream the tokens within this row
    #[must_use]
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens::new(&self.text)
    }

    /// Render part of the row, starting at display column `start`
    /// ```ignore
    /// "He好llo" // 0..
    /// "好llo"   // 2..
    /// " llo"    // 3..
    /// "llo"     // 4..
    /// ```
    /// A wide character cut in half by `start` is replaced with a space
    #[must_use]
    pub fn render(&self, range: std::ops::RangeFrom<usize>, tab: usize) -> String {
        let text = self.render_full(tab);
        let mut col = 0;
        for (idx, ch) in text.char_indices() {
            if col >= range.start {
                let pad = if col > range.start { " " } else { "" };
                return format!("{}{}", pad, &text[idx..]);
            }
            col += width_char(ch, tab);
        }
        String::new()
    }

    /// The whole row with tabs expanded
    #[must_use]
    pub fn render_full(&self, tab: usize) -> String {
        self.render_raw().replace('\t', &" ".repeat(tab))
    }

    /// The row as text, tabs left alone
    #[must_use]
    pub fn render_raw(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }

    /// Find the byte length of this row
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Columns the row takes up on screen
    #[must_use]
    pub fn width(&self, tab: usize) -> usize {
        width(&self.render_raw(), tab)
    }

    /// Calculate the display column of a byte index
    #[must_use]
    pub fn display_col(&self, x: usize, tab: usize) -> usize {
        let end = x.min(self.len());
        width(&String::from_utf8_lossy(&self.text[..end]), tab)
    }
}
