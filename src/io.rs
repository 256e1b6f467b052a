//! io: Reading and writing newline-delimited files
//!
//! Documents never touch the file system directly, they go through a
//! [Storage] so hosts can substitute their own backend.

use crate::event::Result;
use crate::regex;
use std::collections::HashMap;
use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};

/// The storage collaborator a document loads from and saves to
pub trait Storage {
    /// Read a file as an ordered list of lines, without their terminators
    /// # Errors
    /// Will return `Err` if the file doesn't exist or can't be read
    fn read_lines(&self, path: &Path) -> Result<Vec<Vec<u8>>>;

    /// Write lines to a file, each followed by exactly one newline
    /// # Errors
    /// Will return `Err` if the file can't be written
    fn write_lines(&mut self, path: &Path, lines: &[Vec<u8>]) -> Result<()>;
}

/// Split raw file contents into lines.
/// A trailing record without a newline is still captured as a line.
#[must_use]
pub fn split_lines(raw: &[u8]) -> Vec<Vec<u8>> {
    if raw.is_empty() {
        return vec![];
    }
    let mut lines: Vec<Vec<u8>> = regex!("\n").split(raw).map(<[u8]>::to_vec).collect();
    if raw.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

/// Join lines back into raw file contents
#[must_use]
pub fn join_lines(lines: &[Vec<u8>]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        raw.extend_from_slice(line);
        raw.push(b'\n');
    }
    raw
}

/// Storage backed by the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl Storage for FileSystem {
    fn read_lines(&self, path: &Path) -> Result<Vec<Vec<u8>>> {
        Ok(split_lines(&fs::read(path)?))
    }

    fn write_lines(&mut self, path: &Path, lines: &[Vec<u8>]) -> Result<()> {
        fs::write(path, join_lines(lines))?;
        Ok(())
    }
}

/// Storage held entirely in memory, handy for hosts without a disk and for tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with raw contents
    pub fn insert<P: Into<PathBuf>, B: AsRef<[u8]>>(&mut self, path: P, raw: B) {
        self.files.insert(path.into(), raw.as_ref().to_vec());
    }

    /// Raw contents of a file, exactly as last written
    #[must_use]
    pub fn raw(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl Storage for MemoryStorage {
    fn read_lines(&self, path: &Path) -> Result<Vec<Vec<u8>>> {
        let raw = self.files.get(path).ok_or_else(|| {
            IoError::new(ErrorKind::NotFound, format!("{} not found", path.display()))
        })?;
        Ok(split_lines(raw))
    }

    fn write_lines(&mut self, path: &Path, lines: &[Vec<u8>]) -> Result<()> {
        self.files.insert(path.to_path_buf(), join_lines(lines));
        Ok(())
    }
}
