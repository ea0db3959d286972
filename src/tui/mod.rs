//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (request outstanding): draws every ~80ms so the sending
//!   spinner stays smooth.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous
//! redraws.
//!
//! ## Concurrency
//!
//! Completion requests run on `tokio` tasks. A task never touches state:
//! it sends exactly one `Action` back over an `mpsc` channel that only this
//! loop drains, so every mutation is serialized through `update()`. The
//! `RequestGuard` permit makes a second concurrent request impossible even
//! if a submit were somehow triggered while one is outstanding.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{
    CompletionProvider, CompletionRequest, OpenAiProvider, ProviderError, RequestGuard,
};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the completion provider from a resolved config.
///
/// The credential is required: without one the provider cannot
/// authenticate, so this fails before the terminal enters raw mode.
pub fn build_provider(
    config: &ResolvedConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        ProviderError::Config(
            "OpenAI API key not set (set OPENAI_API_KEY or api_key in ~/.confab/config.toml)"
                .to_string(),
        )
    })?;
    Ok(Arc::new(OpenAiProvider::new(
        api_key,
        Some(config.base_url.clone()),
    )))
}

pub fn run(provider: Arc<dyn CompletionProvider>, config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    // Channel for actions from background request tasks
    let (tx, rx) = mpsc::channel();

    // Mutual exclusion for the single in-flight request
    let guard = RequestGuard::new();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync InputBox props with App state
        tui.input_box.sending = app.is_loading;

        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.input_box.spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                // Resize just needs a redraw (already flagged above)
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        should_quit = true;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.message_list.handle_event(&event);
                }
                // The send control is disabled while a request is
                // outstanding; the buffer is kept for later
                TuiEvent::Submit if app.is_loading => {}
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event)
                        && let Effect::SpawnRequest(text) = update(&mut app, Action::Submit(text))
                    {
                        spawn_request(&app, &guard, tx.clone(), text);
                    }
                }
            }
        }

        if should_quit {
            break;
        }

        // Apply completion results delivered from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Spawns the single outstanding completion request.
///
/// The permit is claimed before the task starts and released inside the
/// task right before the result action is sent, so the slot is free again
/// by the time the reducer clears `is_loading`. Exactly one action is sent
/// per spawned request.
fn spawn_request(app: &App, guard: &RequestGuard, tx: mpsc::Sender<Action>, user_text: String) {
    let Some(permit) = guard.try_acquire() else {
        // The reducer refuses submits while loading, so this only trips if
        // a second trigger races the completion action
        warn!("Request refused: another completion is already in flight");
        return;
    };

    info!("Spawning completion request ({} chars)", user_text.len());

    let provider = app.provider.clone();
    let model = app.model_name.clone();
    let system_prompt = app.system_prompt.clone();
    let max_reply_tokens = app.max_reply_tokens;

    tokio::spawn(async move {
        let request = CompletionRequest {
            system_prompt: &system_prompt,
            user_text: &user_text,
            model: &model,
            max_reply_tokens,
        };

        let action = match provider.complete(request).await {
            Ok(reply) => Action::CompletionSucceeded(reply),
            Err(e) => {
                info!("Completion error: {}", e);
                Action::CompletionFailed(e.to_string())
            }
        };

        drop(permit);
        if tx.send(action).is_err() {
            warn!("Failed to deliver completion result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{
        DEFAULT_GREETING, DEFAULT_MAX_REPLY_TOKENS, DEFAULT_OPENAI_BASE_URL,
        DEFAULT_SYSTEM_PROMPT,
    };
    use crate::test_support::StaticProvider;

    fn resolved_config(api_key: Option<&str>) -> ResolvedConfig {
        ResolvedConfig {
            model_name: "test-model".to_string(),
            max_reply_tokens: DEFAULT_MAX_REPLY_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            api_key: api_key.map(|s| s.to_string()),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    #[test]
    fn test_build_provider_requires_api_key() {
        let err = build_provider(&resolved_config(None)).err().unwrap();
        assert!(matches!(err, ProviderError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_build_provider_with_key() {
        let provider = build_provider(&resolved_config(Some("sk-test"))).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_request_delivers_exactly_one_success_action() {
        let mut app = App::new(
            Arc::new(StaticProvider::replying("Hi there")),
            "test-model".to_string(),
        );
        let guard = RequestGuard::new();
        let (tx, rx) = mpsc::channel();

        let effect = update(&mut app, Action::Submit("hello".to_string()));
        assert_eq!(effect, Effect::SpawnRequest("hello".to_string()));
        spawn_request(&app, &guard, tx, "hello".to_string());

        let action = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("completion action should arrive");
        assert_eq!(action, Action::CompletionSucceeded("Hi there".to_string()));

        // Exactly one action per request, and the slot is free again
        assert!(rx.recv_timeout(std::time::Duration::from_millis(100)).is_err());
        assert!(!guard.is_in_flight());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_request_delivers_failure_action() {
        let app = App::new(
            Arc::new(StaticProvider::failing("boom")),
            "test-model".to_string(),
        );
        let guard = RequestGuard::new();
        let (tx, rx) = mpsc::channel();

        spawn_request(&app, &guard, tx, "hello".to_string());

        let action = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("completion action should arrive");
        assert!(matches!(
            action,
            Action::CompletionFailed(ref description) if description.contains("boom")
        ));
        assert!(!guard.is_in_flight());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_spawn_request_refused_while_permit_held() {
        let app = App::new(
            Arc::new(StaticProvider::replying("unused")),
            "test-model".to_string(),
        );
        let guard = RequestGuard::new();
        let (tx, rx) = mpsc::channel();

        let _permit = guard.try_acquire().unwrap();
        spawn_request(&app, &guard, tx, "hello".to_string());

        // No task was spawned, so nothing ever arrives
        assert!(rx.recv_timeout(std::time::Duration::from_millis(200)).is_err());
    }
}
