//! utils: Positions, sizes, byte classes and display widths
//!
//! Everything in here is free of document state so it can be shared by the
//! row, navigator and tokenizer code.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Whitespace byte array
pub const WHITESPACE: [u8; 2] = [b' ', b'\t'];

/// String helper macro
#[macro_export]
macro_rules! st {
    ($value:expr) => {
        $value.to_string()
    };
}

/// Lazy byte regex creation
#[macro_export]
macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: once_cell::sync::OnceCell<regex::bytes::Regex> =
            once_cell::sync::OnceCell::new();
        RE.get_or_init(|| regex::bytes::Regex::new($re).unwrap())
    }};
}

/// A struct that holds positions, `x` is the column and `y` is the row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Loc {
    pub x: usize,
    pub y: usize,
}

impl From<(usize, usize)> for Loc {
    fn from(loc: (usize, usize)) -> Loc {
        let (x, y) = loc;
        Loc { x, y }
    }
}

/// A struct that holds size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub w: usize,
    pub h: usize,
}

impl From<(usize, usize)> for Size {
    fn from(size: (usize, usize)) -> Size {
        let (w, h) = size;
        Size { w, h }
    }
}

/// The class a byte falls into for word motion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteClass {
    /// Letters and digits
    Word,
    /// Spaces and tabs
    Space,
    /// Anything else, mostly punctuation
    Other,
}

/// Work out which class a byte belongs to
#[must_use]
pub fn class(byte: u8) -> ByteClass {
    if byte.is_ascii_alphanumeric() {
        ByteClass::Word
    } else if WHITESPACE.contains(&byte) {
        ByteClass::Space
    } else {
        ByteClass::Other
    }
}

/// True if the bytes hold a line terminator, which rows never contain
#[must_use]
pub fn has_line_break(text: &[u8]) -> bool {
    text.iter().any(|b| matches!(b, b'\n' | b'\r'))
}

/// Length of the run of leading spaces and tabs
#[must_use]
pub fn leading_whitespace(text: &[u8]) -> usize {
    text.iter().take_while(|b| WHITESPACE.contains(b)).count()
}

/// Find the bounds of the alphanumeric word touching `idx`
#[must_use]
pub fn word_bounds(text: &[u8], idx: usize) -> Option<std::ops::Range<usize>> {
    if !text.get(idx)?.is_ascii_alphanumeric() {
        return None;
    }
    let mut start = idx;
    while start > 0 && text[start - 1].is_ascii_alphanumeric() {
        start -= 1;
    }
    let mut end = idx;
    while end < text.len() && text[end].is_ascii_alphanumeric() {
        end += 1;
    }
    Some(start..end)
}

/// Find the first occurrence of `pattern` in `text` starting at or after `from`
#[must_use]
pub fn find_bytes(text: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    if pattern.is_empty() || from > text.len() || pattern.len() > text.len() - from {
        return None;
    }
    text[from..]
        .windows(pattern.len())
        .position(|w| w == pattern)
        .map(|i| i + from)
}

/// Find the last occurrence of `pattern` in `text` that starts before `before`
#[must_use]
pub fn rfind_bytes(text: &[u8], pattern: &[u8], before: usize) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return None;
    }
    let last_start = (text.len() - pattern.len()).min(before.checked_sub(1)?);
    (0..=last_start)
        .rev()
        .find(|&i| &text[i..i + pattern.len()] == pattern)
}

/// Determine the display width of a string
#[must_use]
pub fn width(s: &str, tab: usize) -> usize {
    let s = s.replace('\t', &" ".repeat(tab));
    s.width()
}

/// Determine the display width of a character
#[must_use]
pub fn width_char(c: char, tab: usize) -> usize {
    if c == '\t' {
        tab
    } else {
        c.width().unwrap_or(0)
    }
}
