//! # Actions
//!
//! Everything that can happen in Confab becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The request task finishes? That's `Action::CompletionSucceeded` or
//! `Action::CompletionFailed`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state. No I/O here; work the caller must perform comes back
//! as an `Effect`.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on the state.

use log::{debug, warn};

use crate::core::state::App;
use crate::core::transcript::Message;

/// Everything that can happen in the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user committed the input buffer.
    Submit(String),
    /// The outstanding request produced a reply.
    CompletionSucceeded(String),
    /// The outstanding request failed; the payload is a human-readable
    /// description shown in the error banner.
    CompletionFailed(String),
    Quit,
}

/// Work the caller must perform after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue a completion request for this user text.
    SpawnRequest(String),
    Quit,
}

/// Applies an action to the state.
///
/// Submits are refused while a request is outstanding; whitespace-only
/// submits are ignored entirely. Exactly one of the two completion actions
/// arrives per spawned request, so `is_loading` clears exactly once.
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(text) => {
            if text.trim().is_empty() {
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit refused: request already in flight");
                return Effect::None;
            }
            app.transcript.push(Message::user(text.clone()));
            app.error = None;
            app.is_loading = true;
            app.status_message = String::from("Waiting for reply...");
            Effect::SpawnRequest(text)
        }
        Action::CompletionSucceeded(reply) => {
            app.is_loading = false;
            app.error = None;
            app.status_message = String::from("Ready");
            app.transcript.push(Message::assistant(reply));
            Effect::None
        }
        Action::CompletionFailed(description) => {
            warn!("Completion failed: {description}");
            app.is_loading = false;
            app.status_message = String::from("Ready");
            app.error = Some(description);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Author;
    use crate::test_support::test_app;

    #[test]
    fn test_submit_appends_user_message_and_spawns_request() {
        let mut app = test_app();
        let before = app.transcript.len();

        let effect = update(&mut app, Action::Submit("hello there".to_string()));

        assert_eq!(effect, Effect::SpawnRequest("hello there".to_string()));
        assert_eq!(app.transcript.len(), before + 1);
        let last = app.transcript.messages().last().unwrap();
        assert_eq!(last.author, Author::User);
        assert_eq!(last.text, "hello there");
        assert!(app.is_loading);
        assert_eq!(app.status_message, "Waiting for reply...");
    }

    #[test]
    fn test_submit_whitespace_only_is_ignored() {
        let mut app = test_app();
        let before = app.transcript.len();

        for text in ["", "   ", "\t\n  "] {
            let effect = update(&mut app, Action::Submit(text.to_string()));
            assert_eq!(effect, Effect::None);
        }

        assert_eq!(app.transcript.len(), before);
        assert!(!app.is_loading);
    }

    #[test]
    fn test_submit_refused_while_loading() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        let before = app.transcript.len();

        let effect = update(&mut app, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), before);
    }

    #[test]
    fn test_submit_clears_previous_error() {
        let mut app = test_app();
        app.error = Some("old failure".to_string());

        update(&mut app, Action::Submit("retry".to_string()));

        assert!(app.error.is_none());
    }

    #[test]
    fn test_completion_success_appends_assistant_message() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        let before = app.transcript.len();

        let effect = update(&mut app, Action::CompletionSucceeded("Hi there".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), before + 1);
        let last = app.transcript.messages().last().unwrap();
        assert_eq!(last.author, Author::Assistant);
        assert_eq!(last.text, "Hi there");
        assert!(!app.is_loading);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_completion_failure_sets_error_and_appends_nothing() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hi".to_string()));
        let before = app.transcript.len();

        let effect = update(
            &mut app,
            Action::CompletionFailed("error reaching the API: dns".to_string()),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), before);
        assert!(!app.is_loading);
        assert_eq!(app.error.as_deref(), Some("error reaching the API: dns"));
    }

    #[test]
    fn test_error_is_overwritten_not_accumulated() {
        let mut app = test_app();
        update(&mut app, Action::Submit("one".to_string()));
        update(&mut app, Action::CompletionFailed("first".to_string()));
        update(&mut app, Action::Submit("two".to_string()));
        update(&mut app, Action::CompletionFailed("second".to_string()));

        assert_eq!(app.error.as_deref(), Some("second"));
    }

    #[test]
    fn test_loading_clears_after_completion_then_submit_allowed_again() {
        let mut app = test_app();
        update(&mut app, Action::Submit("one".to_string()));
        assert!(app.is_loading);
        update(&mut app, Action::CompletionSucceeded("ok".to_string()));
        assert!(!app.is_loading);

        let effect = update(&mut app, Action::Submit("two".to_string()));
        assert_eq!(effect, Effect::SpawnRequest("two".to_string()));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
