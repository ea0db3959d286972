//! # InputBox Component
//!
//! Single-line text input with the send state folded into its frame.
//!
//! ## Responsibilities
//!
//! - Capture text input and basic editing (backspace, delete, cursor moves)
//! - Handle submission (Enter) — blank input is ignored, buffer kept
//! - Show a spinner in place of the send hint while a request is outstanding
//!
//! The buffer and cursor are internal state; `sending` and `spinner_frame`
//! are props synced from the application state each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed on a non-blank buffer)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

/// Text input component.
///
/// # State
///
/// - `buffer`: current text being typed
/// - `cursor_pos`: byte offset into the buffer, always on a char boundary
/// - `scroll_cols`: horizontal display-column scroll keeping the cursor visible
///
/// # Props
///
/// - `sending`: a request is outstanding — Enter is inert, frame dimmed
/// - `spinner_frame`: animation frame for the sending indicator
pub struct InputBox {
    pub buffer: String,
    cursor_pos: usize,
    scroll_cols: u16,
    pub sending: bool,
    pub spinner_frame: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_pos: 0,
            scroll_cols: 0,
            sending: false,
            spinner_frame: 0,
        }
    }

    /// Display column of the cursor within the full buffer.
    fn cursor_cols(&self) -> u16 {
        UnicodeWidthStr::width(&self.buffer[..self.cursor_pos]) as u16
    }

    /// Shift the horizontal window so the cursor stays visible.
    fn update_scroll(&mut self, inner_width: u16) {
        let cursor = self.cursor_cols();
        if cursor < self.scroll_cols {
            self.scroll_cols = cursor;
        } else if inner_width > 0 && cursor >= self.scroll_cols + inner_width {
            self.scroll_cols = cursor - inner_width + 1;
        }
    }

    /// The slice of the buffer that fits the window at the current scroll.
    fn visible_text(&self, inner_width: u16) -> String {
        let start = self.scroll_cols;
        let end = start.saturating_add(inner_width);
        let mut col: u16 = 0;
        let mut out = String::new();
        for c in self.buffer.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0) as u16;
            if col >= end {
                break;
            }
            if col >= start {
                out.push(c);
            }
            col = col.saturating_add(w);
        }
        out
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        self.update_scroll(inner_width);

        let title = if self.sending {
            format!("{} Sending", SPINNER[self.spinner_frame % SPINNER.len()])
        } else {
            String::from("Input (Enter to send)")
        };

        let style = if self.sending {
            Style::default().fg(Color::Green).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Green)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(title);

        let input = Paragraph::new(self.visible_text(inner_width))
            .block(block)
            .style(style);
        frame.render_widget(input, area);

        if !self.sending {
            let cursor_x = area.x + 1 + self.cursor_cols().saturating_sub(self.scroll_cols);
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor_pos, *c);
                self.cursor_pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single-line field: flatten pasted newlines to spaces
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor_pos, &flat);
                self.cursor_pos += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor_pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor_pos);
                    self.buffer.drain(prev..self.cursor_pos);
                    self.cursor_pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor_pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor_pos);
                    self.buffer.drain(self.cursor_pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor_pos > 0 {
                    self.cursor_pos = prev_char_boundary(&self.buffer, self.cursor_pos);
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor_pos < self.buffer.len() {
                    self.cursor_pos = next_char_boundary(&self.buffer, self.cursor_pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor_pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor_pos = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                // Inert while sending; blank input is ignored and kept
                if self.sending || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor_pos = 0;
                self.scroll_cols = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

/// Largest char boundary strictly before `pos`.
fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos.saturating_sub(1);
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Smallest char boundary strictly after `pos`.
fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = (pos + 1).min(s.len());
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_builds_buffer() {
        let mut input = InputBox::new();
        type_str(&mut input, "hello");
        assert_eq!(input.buffer, "hello");
    }

    #[test]
    fn test_submit_emits_text_and_clears_buffer() {
        let mut input = InputBox::new();
        type_str(&mut input, "hello");

        let event = input.handle_event(&TuiEvent::Submit);

        assert_eq!(event, Some(InputEvent::Submit("hello".to_string())));
        assert!(input.buffer.is_empty());
        assert_eq!(input.cursor_pos, 0);
    }

    #[test]
    fn test_submit_blank_is_ignored_and_buffer_kept() {
        let mut input = InputBox::new();
        type_str(&mut input, "   ");

        let event = input.handle_event(&TuiEvent::Submit);

        assert_eq!(event, None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_submit_while_sending_is_inert() {
        let mut input = InputBox::new();
        type_str(&mut input, "queued thought");
        input.sending = true;

        let event = input.handle_event(&TuiEvent::Submit);

        assert_eq!(event, None);
        assert_eq!(input.buffer, "queued thought");
    }

    #[test]
    fn test_backspace_respects_char_boundaries() {
        let mut input = InputBox::new();
        type_str(&mut input, "héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::CursorRight); // past 'é'

        input.handle_event(&TuiEvent::Backspace);

        assert_eq!(input.buffer, "hllo");
    }

    #[test]
    fn test_delete_removes_char_under_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "abc");
        input.handle_event(&TuiEvent::CursorHome);

        input.handle_event(&TuiEvent::Delete);

        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("one\ntwo\r\nthree".to_string()));
        assert_eq!(input.buffer, "one two  three");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = InputBox::new();
        type_str(&mut input, "ac");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");
    }

    #[test]
    fn test_visible_text_scrolls_with_cursor() {
        let mut input = InputBox::new();
        type_str(&mut input, "abcdefghij");

        // Window of 5 columns: cursor at the end forces the tail into view
        input.update_scroll(5);
        assert_eq!(input.visible_text(5), "ghij");

        input.handle_event(&TuiEvent::CursorHome);
        input.update_scroll(5);
        assert_eq!(input.visible_text(5), "abcde");
    }
}
