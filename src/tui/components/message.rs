use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::transcript::{Author, Message};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Fraction of the list width a bubble may occupy.
const BUBBLE_WIDTH_NUM: u32 = 3;
const BUBBLE_WIDTH_DEN: u32 = 5;

/// A stateless component that renders a single chat message as a bubble.
///
/// `MessageBubble` is a transient component: it's created fresh each frame
/// with the message it needs to render. User bubbles hug the right edge,
/// assistant bubbles the left, and the bubble shrinks to its content up to
/// a cap of 3/5 of the list width.
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height
/// using `textwrap` with options that match Ratatui's `Paragraph` wrapping
/// behavior, so the parent `MessageList` can lay out scroll positions
/// without rendering anything.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Widest wrap width available to bubble content at the given list width.
    fn content_cap(list_width: u16) -> u16 {
        let cap = (list_width as u32 * BUBBLE_WIDTH_NUM / BUBBLE_WIDTH_DEN) as u16;
        cap.saturating_sub(HORIZONTAL_OVERHEAD).max(1)
    }

    /// The bubble's rectangle within a row of the given width: capped,
    /// shrunk to its content, and aligned by author.
    pub fn layout(message: &Message, list_width: u16, y: u16) -> Rect {
        let cap = Self::content_cap(list_width);
        let content_width = wrap_lines(&message.text, cap)
            .iter()
            .map(|line| line.width() as u16)
            .max()
            .unwrap_or(0)
            .clamp(1, cap);
        let width = (content_width + HORIZONTAL_OVERHEAD).min(list_width);
        let height = Self::calculate_height(message, list_width);
        let x = match message.author {
            Author::User => list_width.saturating_sub(width),
            Author::Assistant => 0,
        };
        Rect::new(x, y, width, height)
    }

    /// Calculate the height required for this message given the list width.
    ///
    /// The wrapping options must match the `Ratatui` default for `Paragraph`
    /// to ensure 1:1 mapping between calculated and actual height.
    pub fn calculate_height(message: &Message, list_width: u16) -> u16 {
        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let cap = Self::content_cap(list_width);
        let lines = wrap_lines(content, cap);
        // Ensure at least 1 content line even if textwrap returns empty
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }
}

fn wrap_lines(content: &str, width: u16) -> Vec<std::borrow::Cow<'_, str>> {
    let options = textwrap::Options::new(width.max(1) as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    textwrap::wrap(content.trim(), options)
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label, style) = match self.message.author {
            Author::User => ("you", Style::default().fg(Color::Magenta)),
            Author::Assistant => ("confab", Style::default().fg(Color::Blue)),
        };
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(label)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}
