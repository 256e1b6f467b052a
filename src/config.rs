//! config: Editor settings
//!
//! Settings are read from a TOML file such as:
//!
//! ```toml
//! tab_width = 4
//! indent_width = 4
//! auto_indent = true
//! line_numbers = true
//! highlighting = true
//! scroll_margin = 10
//! recent_limit = 10
//! ```
//!
//! Any key left out takes its default.

use crate::document::{INDENT_WIDTH, SCROLL_MARGIN};
use crate::event::Result;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display width of a tab
    pub tab_width: usize,
    /// Spaces added by indent and auto-indent after an opening brace
    pub indent_width: usize,
    /// Seed new lines with the indentation of the line above
    pub auto_indent: bool,
    /// Show the line number gutter
    pub line_numbers: bool,
    /// Colour tokens when rendering
    pub highlighting: bool,
    /// Columns kept between the cursor and the viewport edge
    pub scroll_margin: usize,
    /// How many recent files to remember
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_width: 4,
            indent_width: INDENT_WIDTH,
            auto_indent: true,
            line_numbers: true,
            highlighting: true,
            scroll_margin: SCROLL_MARGIN,
            recent_limit: 10,
        }
    }
}

impl Config {
    /// Parse settings from TOML text
    /// # Errors
    /// Will return `Err` if the text isn't valid TOML or a value has the wrong type
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a file, falling back to defaults if it doesn't exist
    /// # Errors
    /// Will return `Err` if the file can't be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
