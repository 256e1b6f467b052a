//! dispatch: Turning input events into editing actions
//!
//! [Editor::handle] takes one key at a time. Whatever the key did, the cursor
//! is clamped back onto the document and scrolled into view before it returns.

use crate::document::Case;
use crate::editor::Editor;
use crate::event::{Error, Event, Result};
use crate::mode::{Key, Mode, Prefix};
use crate::navigate::Motion;
use crate::utils::Loc;
use tracing::debug;

/// What the host should do after a key has been handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The session asked to end
    Quit,
}

impl Editor {
    /// Process a single input event
    pub fn handle(&mut self, key: Key) -> Outcome {
        self.message = None;
        let result = match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Insert => self.handle_insert(key),
            Mode::Command | Mode::Search | Mode::Replace => self.handle_prompt(key),
            Mode::Visual => self.handle_visual(key),
        };
        let outcome = result.unwrap_or_else(|e| {
            self.report(&e);
            Outcome::Continue
        });
        self.sync_size();
        self.doc_mut().reclamp();
        outcome
    }

    fn handle_normal(&mut self, key: Key) -> Result<Outcome> {
        if let Some(prefix) = self.pending.take() {
            self.resolve(prefix, key)?;
            return Ok(Outcome::Continue);
        }
        if let Some(prefix) = Prefix::from_key(key) {
            self.pending = Some(prefix);
            return Ok(Outcome::Continue);
        }
        if let Some(motion) = normal_motion(key) {
            self.doc_mut().navigate(motion);
            return Ok(Outcome::Continue);
        }
        match key {
            Key::Char(b'x') | Key::Delete => {
                let doc = self.doc_mut();
                let Loc { x, y } = doc.cursor;
                if x < doc.current_row().len() {
                    doc.delete_char(y, x)?;
                }
            }
            Key::Char(b'p') => self.paste(true)?,
            Key::Char(b'P') => self.paste(false)?,
            Key::Char(b'J') => {
                let y = self.doc().cursor.y;
                self.doc_mut().join_line(y)?;
            }
            Key::Char(b'>') => self.doc_mut().indent(),
            Key::Char(b'<') => {
                self.doc_mut().unindent();
            }
            Key::Char(b'~') => {
                self.doc_mut().change_case(Case::Toggle);
            }
            Key::Char(b'U') => {
                self.doc_mut().change_case(Case::Upper);
            }
            Key::Char(b'u') => {
                self.doc_mut().change_case(Case::Lower);
            }
            Key::Char(b't') => {
                self.doc_mut().transpose();
            }
            Key::Char(b'n') => {
                self.repeat_search(true)?;
            }
            Key::Char(b'N') => {
                self.repeat_search(false)?;
            }
            Key::Char(b'i') => self.set_mode(Mode::Insert),
            Key::Char(b'a') => {
                let doc = self.doc_mut();
                if doc.cursor.x < doc.current_row().len() {
                    doc.cursor.x += 1;
                }
                self.set_mode(Mode::Insert);
            }
            Key::Char(b'A') => {
                self.doc_mut().navigate(Motion::LineEnd);
                self.set_mode(Mode::Insert);
            }
            Key::Char(b'I') => {
                let doc = self.doc_mut();
                doc.cursor.x = doc.current_row().indent();
                self.set_mode(Mode::Insert);
            }
            Key::Char(b'o') => {
                let auto_indent = self.config.auto_indent;
                let doc = self.doc_mut();
                doc.navigate(Motion::LineEnd);
                doc.new_line(auto_indent)?;
                self.set_mode(Mode::Insert);
            }
            Key::Char(b'O') => {
                let auto_indent = self.config.auto_indent;
                let doc = self.doc_mut();
                let y = doc.cursor.y;
                let indent = if auto_indent {
                    let row = doc.current_row();
                    row.text[..row.indent()].to_vec()
                } else {
                    vec![]
                };
                let width = indent.len();
                doc.insert_line(y);
                doc.rows[y].insert(0, indent)?;
                doc.goto((width, y))?;
                self.set_mode(Mode::Insert);
            }
            Key::Char(b':') => self.set_mode(Mode::Command),
            Key::Char(b'/') => self.set_mode(Mode::Search),
            Key::Char(b'R') => self.set_mode(Mode::Replace),
            Key::Char(b'v') => self.set_mode(Mode::Visual),
            _ => (),
        }
        Ok(Outcome::Continue)
    }

    /// Finish a two key command. A second key that doesn't complete one is dropped.
    fn resolve(&mut self, prefix: Prefix, key: Key) -> Result<()> {
        match (prefix, key) {
            (Prefix::Go, Key::Char(b'g')) => {
                self.doc_mut().navigate(Motion::FileStart);
            }
            (Prefix::Delete, Key::Char(b'd')) => self.delete_line()?,
            (Prefix::Delete, Key::Char(b'w')) => {
                self.doc_mut().delete_word();
            }
            (Prefix::Yank, Key::Char(b'y')) => self.yank_line(),
            _ => debug!(?prefix, ?key, "discarding unmatched prefix"),
        }
        Ok(())
    }

    fn handle_insert(&mut self, key: Key) -> Result<Outcome> {
        if key.is_cancel() {
            self.set_mode(Mode::Normal);
            let doc = self.doc_mut();
            doc.cursor.x = doc.cursor.x.saturating_sub(1);
            doc.target_x = doc.cursor.x;
            return Ok(Outcome::Continue);
        }
        if let Some(motion) = insert_motion(key) {
            self.doc_mut().navigate(motion);
            return Ok(Outcome::Continue);
        }
        let auto_indent = self.config.auto_indent;
        let doc = self.doc_mut();
        let loc = doc.cursor;
        match key {
            Key::Char(b'\n' | b'\r') | Key::Enter => {
                doc.new_line(auto_indent)?;
            }
            Key::Char(ch) => {
                doc.execute(Event::Insert(loc, ch))?;
            }
            Key::Tab => {
                doc.execute(Event::Insert(loc, b'\t'))?;
            }
            Key::Backspace if loc.x == 0 => {
                doc.execute(Event::SpliceUp(loc))?;
            }
            Key::Backspace => {
                let ch = doc.current_row().text[loc.x - 1];
                doc.execute(Event::Remove(loc, ch))?;
            }
            Key::Delete if loc.x < doc.current_row().len() => {
                doc.delete_char(loc.y, loc.x)?;
            }
            Key::Delete => {
                doc.join_line(loc.y)?;
            }
            _ => (),
        }
        Ok(Outcome::Continue)
    }

    fn handle_prompt(&mut self, key: Key) -> Result<Outcome> {
        match key {
            k if k.is_cancel() => self.set_mode(Mode::Normal),
            Key::Backspace => {
                if self.prompt.pop().is_none() {
                    self.set_mode(Mode::Normal);
                }
            }
            Key::Enter | Key::Char(b'\n' | b'\r') => {
                let mode = self.mode;
                let text = std::mem::take(&mut self.prompt);
                self.set_mode(Mode::Normal);
                return self.commit(mode, text);
            }
            Key::Char(ch) => self.prompt.push(ch),
            _ => (),
        }
        Ok(Outcome::Continue)
    }

    fn commit(&mut self, mode: Mode, text: Vec<u8>) -> Result<Outcome> {
        match mode {
            Mode::Command => {
                let text = String::from_utf8_lossy(&text).into_owned();
                return self.run_command(&text);
            }
            Mode::Search if text.is_empty() => {
                self.repeat_search(true)?;
            }
            Mode::Search => {
                self.search(text, true)?;
            }
            Mode::Replace => {
                let split = text.iter().position(|b| *b == b'/').ok_or(Error::BadReplace)?;
                let (pattern, with) = (&text[..split], &text[split + 1..]);
                if pattern.is_empty() {
                    return Err(Error::BadReplace);
                }
                self.replace(pattern, with)?;
            }
            _ => (),
        }
        Ok(Outcome::Continue)
    }

    /// Visual mode has no selection behaviour, it can only be left
    fn handle_visual(&mut self, key: Key) -> Result<Outcome> {
        if key.is_cancel() {
            self.set_mode(Mode::Normal);
        }
        Ok(Outcome::Continue)
    }
}

fn normal_motion(key: Key) -> Option<Motion> {
    Some(match key {
        Key::Char(b'h') | Key::Left => Motion::Left,
        Key::Char(b'l') | Key::Right => Motion::Right,
        Key::Char(b'k') | Key::Up => Motion::Up,
        Key::Char(b'j') | Key::Down => Motion::Down,
        Key::Char(b'0') => Motion::LineHome,
        Key::Char(b'^') | Key::Home => Motion::LineStart,
        Key::Char(b'$') | Key::End => Motion::LineEnd,
        Key::Char(b'w') => Motion::WordForward,
        Key::Char(b'b') => Motion::WordBackward,
        Key::Char(b'G') => Motion::FileEnd,
        Key::Char(b'%') => Motion::MatchingBracket,
        Key::PageUp => Motion::PageUp,
        Key::PageDown => Motion::PageDown,
        _ => return None,
    })
}

fn insert_motion(key: Key) -> Option<Motion> {
    Some(match key {
        Key::Left => Motion::Left,
        Key::Right => Motion::Right,
        Key::Up => Motion::Up,
        Key::Down => Motion::Down,
        Key::Home => Motion::LineStart,
        Key::End => Motion::LineEnd,
        Key::PageUp => Motion::PageUp,
        Key::PageDown => Motion::PageDown,
        _ => return None,
    })
}
