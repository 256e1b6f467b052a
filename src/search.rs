//! search: Finding and replacing literal text
//!
//! Searches wrap around the ends of the document. Patterns are plain bytes,
//! there is no regular expression support.

use crate::document::Document;
use crate::event::{Error, Result};
use crate::utils::{find_bytes, has_line_break, rfind_bytes, Loc};
use tracing::debug;

impl Document {
    /// Find the next match after the cursor, wrapping around to the top.
    /// The line the cursor is on is searched again in full after wrapping.
    #[must_use]
    pub fn find_next(&self, pattern: &[u8]) -> Option<Loc> {
        let Loc { x, y } = self.cursor;
        let here = &self.rows[y].text;
        if let Some(col) = find_bytes(here, pattern, x + 1) {
            return Some(Loc { x: col, y });
        }
        let total = self.rows.len();
        (1..=total).find_map(|step| {
            let row = (y + step) % total;
            find_bytes(&self.rows[row].text, pattern, 0).map(|col| Loc { x: col, y: row })
        })
    }

    /// Find the previous match before the cursor, wrapping around to the bottom.
    #[must_use]
    pub fn find_prev(&self, pattern: &[u8]) -> Option<Loc> {
        let Loc { x, y } = self.cursor;
        if let Some(col) = rfind_bytes(&self.rows[y].text, pattern, x) {
            return Some(Loc { x: col, y });
        }
        let total = self.rows.len();
        (1..=total).find_map(|step| {
            let row = (y + total - step) % total;
            let text = &self.rows[row].text;
            rfind_bytes(text, pattern, text.len()).map(|col| Loc { x: col, y: row })
        })
    }

    /// Move the cursor to the next match
    /// # Errors
    /// Will return `Err` if the pattern isn't anywhere in the document
    pub fn search_forward(&mut self, pattern: &[u8]) -> Result<Loc> {
        let found = self.find_next(pattern);
        self.jump_to(pattern, found)
    }

    /// Move the cursor to the previous match
    /// # Errors
    /// Will return `Err` if the pattern isn't anywhere in the document
    pub fn search_backward(&mut self, pattern: &[u8]) -> Result<Loc> {
        let found = self.find_prev(pattern);
        self.jump_to(pattern, found)
    }

    fn jump_to(&mut self, pattern: &[u8], found: Option<Loc>) -> Result<Loc> {
        let Some(loc) = found else {
            let pattern = String::from_utf8_lossy(pattern).into_owned();
            debug!(%pattern, "pattern not found");
            return Err(Error::PatternNotFound(pattern));
        };
        self.goto(loc)?;
        Ok(loc)
    }

    /// Replace the first match at or after the cursor on the current line
    /// # Errors
    /// Will return `Err` if the current line has no match from the cursor onward
    pub fn replace_once(&mut self, pattern: &[u8], with: &[u8]) -> Result<Loc> {
        let Loc { x, y } = self.cursor;
        let Some(col) = find_bytes(&self.rows[y].text, pattern, x) else {
            return Err(Error::PatternNotFound(
                String::from_utf8_lossy(pattern).into_owned(),
            ));
        };
        self.rows[y].replace(col..col + pattern.len(), with)?;
        self.modified = true;
        self.goto_x(col)?;
        Ok(Loc { x: col, y })
    }

    /// Replace every non-overlapping match in the document, returning how many
    /// were replaced. Scanning resumes after each replacement so the new text
    /// is never matched again.
    pub fn replace_all(&mut self, pattern: &[u8], with: &[u8]) -> usize {
        if has_line_break(with) {
            return 0;
        }
        let mut count = 0;
        for row in &mut self.rows {
            let mut from = 0;
            while let Some(col) = find_bytes(&row.text, pattern, from) {
                row.text.splice(col..col + pattern.len(), with.iter().copied());
                row.modified = true;
                from = col + with.len();
                count += 1;
            }
        }
        if count > 0 {
            self.modified = true;
            self.reclamp();
        }
        count
    }
}
