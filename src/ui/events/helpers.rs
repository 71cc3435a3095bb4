//! Helper functions for event handling
//!
//! - State locking helpers (apply actions)
//! - Submission gating
//! - Paste batching

use crate::actions::{apply_action, AppAction};
use crate::request::{spawn_audit, AuditClient};
use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Apply a single action to state
pub fn apply(state: &Arc<RwLock<AppState>>, action: AppAction) {
    if let Ok(mut s) = state.write() {
        apply_action(action, &mut s);
    }
}

/// Start an audit unless the submit control is disabled
pub fn submit_if_ready(state: &Arc<RwLock<AppState>>, client: &AuditClient) -> bool {
    let ready = state.read().map(|s| s.can_submit()).unwrap_or(false);

    if ready {
        spawn_audit(Arc::clone(state), client.clone());
    } else {
        tracing::debug!("submit ignored: request in flight or payload is not valid JSON");
    }
    ready
}

/// Collect characters that arrive in quick succession (terminal paste)
///
/// Returns the batch and the key that ended it, if any, so the caller can
/// still handle that key.
pub fn collect_paste_batch(initial_char: char) -> (String, Option<KeyEvent>) {
    let mut batch = String::from(initial_char);

    while let Ok(true) = event::poll(Duration::from_millis(0)) {
        match event::read() {
            Ok(Event::Key(next_key)) => match next_key.code {
                KeyCode::Char(next_c) if !next_key.modifiers.contains(KeyModifiers::CONTROL) => {
                    batch.push(next_c);
                }
                _ => return (batch, Some(next_key)),
            },
            Ok(_) => continue,
            Err(_) => break,
        }
    }

    (batch, None)
}
