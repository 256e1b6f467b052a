//! navigate: Moving the cursor around a document
//!
//! Every motion leaves the cursor on an existing row and column and scrolls
//! the viewport to keep it in sight. Motions that can't go any further return
//! a [Status] rather than failing.

use crate::document::Document;
use crate::event::Status;
use crate::utils::{class, ByteClass};

/// A navigation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// First non-whitespace column, or column 0 if already there
    LineStart,
    /// Column 0
    LineHome,
    LineEnd,
    WordForward,
    WordBackward,
    PageUp,
    PageDown,
    FileStart,
    FileEnd,
    MatchingBracket,
}

/// Column reached by skipping one class run then any whitespace
#[must_use]
pub fn word_forward_col(text: &[u8], x: usize) -> usize {
    let len = text.len();
    if x >= len {
        return len;
    }
    let mut i = x;
    let start = class(text[i]);
    if start != ByteClass::Space {
        while i < len && class(text[i]) == start {
            i += 1;
        }
    }
    while i < len && class(text[i]) == ByteClass::Space {
        i += 1;
    }
    i
}

/// Column reached by skipping whitespace backwards then one class run
#[must_use]
pub fn word_backward_col(text: &[u8], x: usize) -> usize {
    let mut i = x.min(text.len());
    while i > 0 && class(text[i - 1]) == ByteClass::Space {
        i -= 1;
    }
    if i == 0 {
        return 0;
    }
    let run = class(text[i - 1]);
    while i > 0 && class(text[i - 1]) == run {
        i -= 1;
    }
    i
}

/// Find the bracket matching the one at `x`, without leaving the line
#[must_use]
pub fn matching_bracket(text: &[u8], x: usize) -> Option<usize> {
    let this = *text.get(x)?;
    let (other, forward) = match this {
        b'(' => (b')', true),
        b'[' => (b']', true),
        b'{' => (b'}', true),
        b')' => (b'(', false),
        b']' => (b'[', false),
        b'}' => (b'{', false),
        _ => return None,
    };
    let mut depth = 0_usize;
    let mut visit = |i: usize| {
        if text[i] == this {
            depth += 1;
        } else if text[i] == other {
            depth -= 1;
            return depth == 0;
        }
        false
    };
    if forward {
        (x..text.len()).find(|&i| visit(i))
    } else {
        (0..=x).rev().find(|&i| visit(i))
    }
}

impl Document {
    /// Apply a motion to the cursor
    pub fn navigate(&mut self, motion: Motion) -> Status {
        let status = match motion {
            Motion::Left => self.move_left(),
            Motion::Right => self.move_right(),
            Motion::Up => self.move_up(),
            Motion::Down => self.move_down(),
            Motion::LineStart => {
                let first = self.current_row().indent();
                self.set_x(if self.cursor.x == first { 0 } else { first });
                Status::None
            }
            Motion::LineHome => {
                self.set_x(0);
                Status::None
            }
            Motion::LineEnd => {
                self.set_x(self.current_row().len());
                Status::None
            }
            Motion::WordForward => self.move_next_word(),
            Motion::WordBackward => self.move_prev_word(),
            Motion::PageUp => self.move_page(false),
            Motion::PageDown => self.move_page(true),
            Motion::FileStart => {
                self.cursor.y = 0;
                self.set_x(0);
                Status::None
            }
            Motion::FileEnd => {
                self.cursor.y = self.rows.len() - 1;
                self.set_x(0);
                Status::None
            }
            Motion::MatchingBracket => {
                let found = matching_bracket(&self.current_row().text, self.cursor.x);
                if let Some(x) = found {
                    self.set_x(x);
                }
                Status::None
            }
        };
        self.reclamp();
        status
    }

    /// Move the cursor to the left, wrapping onto the end of the row above
    pub fn move_left(&mut self) -> Status {
        if self.cursor.x > 0 {
            self.set_x(self.cursor.x - 1);
        } else if self.cursor.y > 0 {
            self.cursor.y -= 1;
            self.set_x(self.current_row().len());
        } else {
            return Status::StartOfDocument;
        }
        self.scroll();
        Status::None
    }

    /// Move the cursor to the right, wrapping onto the start of the row below
    pub fn move_right(&mut self) -> Status {
        if self.cursor.x < self.current_row().len() {
            self.set_x(self.cursor.x + 1);
        } else if self.cursor.y + 1 < self.rows.len() {
            self.cursor.y += 1;
            self.set_x(0);
        } else {
            return Status::EndOfDocument;
        }
        self.scroll();
        Status::None
    }

    /// Move the cursor upwards, keeping the column it started from where possible
    pub fn move_up(&mut self) -> Status {
        if self.cursor.y == 0 {
            return Status::StartOfDocument;
        }
        self.cursor.y -= 1;
        self.snap_to_target();
        Status::None
    }

    /// Move the cursor downwards, keeping the column it started from where possible
    pub fn move_down(&mut self) -> Status {
        if self.cursor.y + 1 >= self.rows.len() {
            return Status::EndOfDocument;
        }
        self.cursor.y += 1;
        self.snap_to_target();
        Status::None
    }

    fn move_next_word(&mut self) -> Status {
        let row = self.current_row();
        if self.cursor.x >= row.len() {
            if self.cursor.y + 1 >= self.rows.len() {
                return Status::EndOfDocument;
            }
            self.cursor.y += 1;
            let indent = self.current_row().indent();
            self.set_x(indent);
            return Status::None;
        }
        let x = word_forward_col(&row.text, self.cursor.x);
        self.set_x(x);
        Status::None
    }

    fn move_prev_word(&mut self) -> Status {
        if self.cursor.x == 0 {
            if self.cursor.y == 0 {
                return Status::StartOfDocument;
            }
            self.cursor.y -= 1;
            let row = self.current_row();
            let x = word_backward_col(&row.text, row.len());
            self.set_x(x);
            return Status::None;
        }
        let x = word_backward_col(&self.current_row().text, self.cursor.x);
        self.set_x(x);
        Status::None
    }

    fn move_page(&mut self, down: bool) -> Status {
        let step = self.size.h.saturating_sub(1).max(1);
        let last = self.rows.len() - 1;
        if down {
            if self.cursor.y == last {
                return Status::EndOfDocument;
            }
            self.cursor.y = (self.cursor.y + step).min(last);
        } else {
            if self.cursor.y == 0 {
                return Status::StartOfDocument;
            }
            self.cursor.y = self.cursor.y.saturating_sub(step);
        }
        self.snap_to_target();
        Status::None
    }

    /// Set the column and make it the one vertical movement returns to
    fn set_x(&mut self, x: usize) {
        self.cursor.x = x;
        self.target_x = x;
    }

    fn snap_to_target(&mut self) {
        self.cursor.x = self.target_x.min(self.current_row().len());
        self.scroll();
    }
}
