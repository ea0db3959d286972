//! # TitleBar Component
//!
//! Top status bar showing application state.
//!
//! Purely presentational — it receives all data as props and has no
//! internal state. The title text changes based on state:
//!
//! 1. **Unseen content**: `"Confab (model: gpt-4o-mini) | Ready | ↓ New"`
//! 2. **Status message**: `"Confab (model: gpt-4o-mini) | Waiting for reply..."`
//! 3. **Default**: `"Confab (model: gpt-4o-mini)"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::tui::component::Component;

/// Top status bar component showing model name, status, and notifications.
pub struct TitleBar {
    /// Current model name (e.g., "gpt-4o-mini")
    pub model_name: String,
    /// Transient status (e.g., "Waiting for reply...")
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(model_name: String, status_message: String, has_unseen_content: bool) -> Self {
        Self {
            model_name,
            status_message,
            has_unseen_content,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_text = if self.has_unseen_content {
            format!(
                "Confab (model: {}) | {} | ↓ New",
                self.model_name, self.status_message
            )
        } else if self.status_message.is_empty() {
            format!("Confab (model: {})", self.model_name)
        } else {
            format!(
                "Confab (model: {}) | {}",
                self.model_name, self.status_message
            )
        };

        frame.render_widget(Span::raw(title_text), area);
    }
}
