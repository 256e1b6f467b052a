//! mode: Editor modes and the input events they interpret

/// The dispatcher's current interpretation context for input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Navigation and commands
    #[default]
    Normal,
    /// Text entry
    Insert,
    /// `:` prompt
    Command,
    /// `/` prompt
    Search,
    /// `find/replace` prompt
    Replace,
    /// Declared only, selections are not implemented
    Visual,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Command => "COMMAND",
            Mode::Search => "SEARCH",
            Mode::Replace => "REPLACE",
            Mode::Visual => "VISUAL",
        }
    }

    /// True for the modes that collect text in a prompt
    pub fn is_prompt(&self) -> bool {
        matches!(self, Mode::Command | Mode::Search | Mode::Replace)
    }
}

/// One abstract input event, already translated from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable byte
    Char(u8),
    Enter,
    Tab,
    Backspace,
    Delete,
    Escape,
    /// Ctrl-C or similar
    Interrupt,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// Convert an ASCII byte to a key
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x03 => Some(Key::Interrupt),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            b'\t' => Some(Key::Tab),
            0x20..=0x7E => Some(Key::Char(byte)),
            _ => None,
        }
    }

    /// Escape and interrupt both cancel
    pub fn is_cancel(&self) -> bool {
        matches!(self, Key::Escape | Key::Interrupt)
    }
}

/// A Normal mode key that waits for a second key before acting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefix {
    /// `g`: `gg` goes to the start of the file
    Go,
    /// `d`: `dd` deletes a line, `dw` deletes a word
    Delete,
    /// `y`: `yy` copies a line
    Yank,
}

impl Prefix {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Char(b'g') => Some(Prefix::Go),
            Key::Char(b'd') => Some(Prefix::Delete),
            Key::Char(b'y') => Some(Prefix::Yank),
            _ => None,
        }
    }
}
