//! Payload editor module
//!
//! Multi-line text editor holding the raw JSON document set. The text is the
//! source of truth: it is checked after every edit, to gate submission and to
//! preview the record count, and never rewritten (except for an explicit
//! `format_json`).

use crate::json_text;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;

/// A text editor for the audit payload
#[derive(Debug, Clone)]
pub struct PayloadEditor {
    /// The content being edited
    content: String,

    /// Cursor position (byte offset in content, always on a char boundary)
    cursor: usize,

    /// Whether the content has been modified since it was loaded
    dirty: bool,

    /// Syntax check of the current content, refreshed on every edit
    valid: bool,

    /// Length of the top-level `records` array, refreshed on every edit
    record_count: Option<usize>,
}

impl Default for PayloadEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadEditor {
    /// Create a new empty editor
    pub fn new() -> Self {
        Self::with_content(String::new())
    }

    /// Create a new editor with initial content, cursor at the start
    pub fn with_content(content: String) -> Self {
        let mut editor = Self {
            content,
            cursor: 0,
            dirty: false,
            valid: false,
            record_count: None,
        };
        editor.refresh();
        editor
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear all content and reset state
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.mark_edited();
    }

    /// Set content (replaces all existing content)
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor = 0;
        self.mark_edited();
    }

    /// Parse the current text as JSON
    pub fn parse(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.content)
    }

    /// Live validity signal used to enable submission
    pub fn is_valid_json(&self) -> bool {
        self.valid
    }

    /// Number of entries in the top-level `records` array, if there is one
    pub fn record_count(&self) -> Option<usize> {
        self.record_count
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert(cursor, c);
        self.cursor = cursor + c.len_utf8();
        self.mark_edited();
    }

    pub fn insert_str(&mut self, s: &str) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.insert_str(cursor, s);
        self.cursor = cursor + s.len();
        self.mark_edited();
    }

    /// Insert a string with smart quote normalization
    /// Curly double quotes used as string delimiters become straight quotes;
    /// inside a string value they are kept as typed
    pub fn insert_str_normalized(&mut self, s: &str) {
        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        let inside_string = json_text::ends_inside_string(&self.content[..cursor]);
        let normalized = json_text::straighten_quotes(s, inside_string);

        self.insert_str(&normalized);
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the character before the cursor (backspace)
    pub fn delete_char_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let mut cursor = self.cursor - 1;
        while cursor > 0 && !self.content.is_char_boundary(cursor) {
            cursor -= 1;
        }

        self.content.remove(cursor);
        self.cursor = cursor;
        self.mark_edited();
        true
    }

    /// Delete the character after the cursor (delete key)
    pub fn delete_char_after_cursor(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let cursor = self.clamp_cursor_to_boundary(self.cursor);
        self.content.remove(cursor);
        self.mark_edited();
        true
    }

    pub fn move_cursor_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        let mut new_cursor = self.cursor - 1;
        while new_cursor > 0 && !self.content.is_char_boundary(new_cursor) {
            new_cursor -= 1;
        }

        self.cursor = new_cursor;
        true
    }

    pub fn move_cursor_right(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        let mut new_cursor = self.cursor + 1;
        while new_cursor < self.content.len() && !self.content.is_char_boundary(new_cursor) {
            new_cursor += 1;
        }

        self.cursor = new_cursor.min(self.content.len());
        true
    }

    /// Move to the same column on the previous line (or its end if shorter)
    pub fn move_cursor_up(&mut self) -> bool {
        let (start, _) = self.line_bounds(self.cursor);
        if start == 0 {
            return false;
        }

        let column = self.content[start..self.cursor].chars().count();
        let (prev_start, prev_end) = self.line_bounds(start - 1);
        self.cursor = self.offset_for_column(prev_start, prev_end, column);
        true
    }

    /// Move to the same column on the next line (or its end if shorter)
    pub fn move_cursor_down(&mut self) -> bool {
        let (start, end) = self.line_bounds(self.cursor);
        if end >= self.content.len() {
            return false;
        }

        let column = self.content[start..self.cursor].chars().count();
        let next_start = end + 1;
        let (_, next_end) = self.line_bounds(next_start);
        self.cursor = self.offset_for_column(next_start, next_end, column);
        true
    }

    pub fn move_cursor_to_line_start(&mut self) {
        self.cursor = self.line_bounds(self.cursor).0;
    }

    pub fn move_cursor_to_line_end(&mut self) {
        self.cursor = self.line_bounds(self.cursor).1;
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Zero-based (line, column) of the cursor, column counted in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.content[..self.cursor];
        let line = before.matches('\n').count();
        let (start, _) = self.line_bounds(self.cursor);
        (line, self.content[start..self.cursor].chars().count())
    }

    /// Format content as JSON (prettify)
    /// Returns Ok(()) if formatting succeeded, Err with the parse error if invalid JSON
    pub fn format_json(&mut self) -> Result<(), String> {
        match self.parse() {
            Ok(json) => {
                if let Ok(pretty) = serde_json::to_string_pretty(&json) {
                    self.content = pretty;
                }
                self.cursor = 0;
                self.mark_edited();
                Ok(())
            }
            Err(e) => Err(format!("Invalid JSON: {e}")),
        }
    }

    /// Handle a key event - returns true if the event was handled
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Backspace => self.delete_char_before_cursor(),
            KeyCode::Delete => self.delete_char_after_cursor(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Up => self.move_cursor_up(),
            KeyCode::Down => self.move_cursor_down(),
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Home if ctrl => {
                self.move_cursor_to_start();
                true
            }
            KeyCode::End if ctrl => {
                self.move_cursor_to_end();
                true
            }
            KeyCode::Home => {
                self.move_cursor_to_line_start();
                true
            }
            KeyCode::End => {
                self.move_cursor_to_line_end();
                true
            }
            KeyCode::Char('a') if ctrl => {
                self.move_cursor_to_line_start();
                true
            }
            KeyCode::Char('e') if ctrl => {
                self.move_cursor_to_line_end();
                true
            }
            KeyCode::Char('l') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    fn mark_edited(&mut self) {
        self.dirty = true;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.valid = json_text::check_syntax(&self.content).is_ok();
        self.record_count = if self.valid {
            self.parse()
                .ok()
                .and_then(|json| json.get("records")?.as_array().map(Vec::len))
        } else {
            None
        };
    }

    /// Byte range of the line containing `pos`, newline excluded
    fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let start = self.content[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let end = self.content[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.content.len());
        (start, end)
    }

    fn offset_for_column(&self, start: usize, end: usize, column: usize) -> usize {
        self.content[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    /// Clamp cursor to valid UTF-8 character boundary
    fn clamp_cursor_to_boundary(&self, cursor: usize) -> usize {
        let mut pos = cursor.min(self.content.len());
        while pos > 0 && !self.content.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}
