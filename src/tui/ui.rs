use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    // The error banner row only exists while an error is set
    let (title_area, main_area, input_area, error_area) = if app.error.is_some() {
        let [t, m, i, e] =
            Layout::vertical([Length(1), Min(0), Length(3), Length(1)]).areas(frame.area());
        (t, m, i, Some(e))
    } else {
        let [t, m, i] = Layout::vertical([Length(1), Min(0), Length(3)]).areas(frame.area());
        (t, m, i, None)
    };

    let mut title_bar = TitleBar::new(
        app.model_name.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
    );
    title_bar.render(frame, title_area);

    MessageList::new(&mut tui.message_list, &app.transcript).render(frame, main_area);

    tui.input_box.render(frame, input_area);

    if let (Some(area), Some(error)) = (error_area, app.error.as_deref()) {
        draw_error_line(frame, area, error);
    }
}

fn draw_error_line(frame: &mut Frame, area: Rect, error: &str) {
    let banner = Paragraph::new(error).style(Style::default().fg(Color::Red));
    frame.render_widget(banner, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui_shows_greeting_and_chrome() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);

        assert!(text.contains("Confab"));
        assert!(text.contains("Welcome to Confab! Ask me anything."));
        assert!(text.contains("Input (Enter to send)"));
    }

    #[test]
    fn test_draw_ui_renders_error_banner() {
        let mut app = test_app();
        app.error = Some("no data received".to_string());
        let mut tui = TuiState::new();
        let text = render_to_text(&app, &mut tui);

        assert!(text.contains("no data received"));
    }

    #[test]
    fn test_draw_ui_sending_state_shows_spinner_title() {
        let app = test_app();
        let mut tui = TuiState::new();
        tui.input_box.sending = true;
        let text = render_to_text(&app, &mut tui);

        assert!(text.contains("Sending"));
        assert!(!text.contains("Enter to send"));
    }
}
