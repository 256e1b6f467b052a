//! token: Classifying spans of a line for highlighting
//!
//! The scanner is stateless. Each call to [classify] looks at one position in
//! one line and reports the kind and length of the token starting there, so a
//! line is tokenized by calling it repeatedly until the line runs out.
//! Nothing carries over between lines.

use crate::utils::WHITESPACE;

/// Words that highlight as keywords
pub const KEYWORDS: [&str; 20] = [
    "set", "let", "if", "elif", "else", "end", "while", "for", "in", "do", "done", "fn",
    "return", "break", "continue", "true", "false", "and", "or", "not",
];

/// `@` variables with a built-in meaning
pub const SPECIALS: [&str; 7] = [
    "@args", "@home", "@path", "@pwd", "@shell", "@status", "@user",
];

/// Bytes that are operators on their own
pub const OPERATORS: &[u8] = b"+-*/%=<>!&|^~(){}[];:,.";

/// What a span of text represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Whitespace, plain identifiers and anything unrecognised
    None,
    Comment,
    String,
    Number,
    Special,
    Variable,
    Keyword,
    Function,
    Operator,
}

/// A classified span of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind,
}

impl Token {
    /// The bytes this token covers
    #[must_use]
    pub fn text<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        &line[self.start..self.end]
    }
}

fn run(line: &[u8], from: usize, accept: impl Fn(u8) -> bool) -> usize {
    line[from..].iter().take_while(|b| accept(**b)).count()
}

fn is_ident(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Classify the token starting at `pos`, returning its kind and length.
/// The length is always at least 1 while `pos` is within the line.
#[must_use]
pub fn classify(line: &[u8], pos: usize) -> (TokenKind, usize) {
    let Some(&first) = line.get(pos) else {
        return (TokenKind::None, 0);
    };
    let rest = &line[pos..];
    if WHITESPACE.contains(&first) {
        return (TokenKind::None, run(line, pos, |b| WHITESPACE.contains(&b)));
    }
    if rest.starts_with(b"//") {
        return (TokenKind::Comment, rest.len());
    }
    if first == b'"' {
        let mut i = 1;
        while i < rest.len() {
            match rest[i] {
                b'\\' => i += 2,
                b'"' => return (TokenKind::String, i + 1),
                _ => i += 1,
            }
        }
        return (TokenKind::String, rest.len());
    }
    if first.is_ascii_digit() {
        return (TokenKind::Number, run(line, pos, |b| b.is_ascii_digit() || b == b'.'));
    }
    if first == b'@' {
        let len = 1 + run(line, pos + 1, |b| b.is_ascii_alphanumeric() || b == b'_');
        let kind = if SPECIALS.iter().any(|s| s.as_bytes() == &rest[..len]) {
            TokenKind::Special
        } else {
            TokenKind::Variable
        };
        return (kind, len);
    }
    if first.is_ascii_alphabetic() || first == b'_' || first == b'~' {
        let len = 1 + run(line, pos + 1, is_ident);
        let word = &rest[..len];
        let kind = if KEYWORDS.iter().any(|k| k.as_bytes() == word) {
            TokenKind::Keyword
        } else {
            let after = pos + len + run(line, pos + len, |b| WHITESPACE.contains(&b));
            if line.get(after) == Some(&b'(') {
                TokenKind::Function
            } else {
                TokenKind::None
            }
        };
        return (kind, len);
    }
    if OPERATORS.contains(&first) {
        let len = if b"+-*/=".contains(&first) && rest.get(1) == Some(&b'=') {
            2
        } else {
            1
        };
        return (TokenKind::Operator, len);
    }
    (TokenKind::None, 1)
}

/// An iterator over the tokens of a single line
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    line: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    #[must_use]
    pub fn new(line: &'a [u8]) -> Self {
        Self { line, pos: 0 }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.line.len() {
            return None;
        }
        let (kind, len) = classify(self.line, self.pos);
        let token = Token {
            start: self.pos,
            end: (self.pos + len).min(self.line.len()),
            kind,
        };
        self.pos = token.end;
        Some(token)
    }
}
