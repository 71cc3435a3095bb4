//! Event handling system for rt-docwatch
//!
//! Translates key presses into AppActions, editor edits or background tasks.
//! Global keys (submit, health probe, focus, quit) are handled first; the
//! rest go to whichever area has focus:
//! - Endpoint: URL text input
//! - Editor: payload editing
//! - Result: scrolling and yanking the report
//!
//! # Lock Management
//!
//! Locks on Arc<RwLock<AppState>> are held only for the duration of a single
//! action and never across a background spawn.

mod helpers;
mod yank;

use crate::actions::AppAction;
use crate::request::{spawn_health_probe, AuditClient};
use crate::state::AppState;
use crate::types::Focus;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use helpers::{apply, collect_paste_batch, submit_if_ready};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Event handler for managing user input and state updates
#[derive(Debug, Default)]
pub struct EventHandler {
    pub should_quit: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll for one input event and dispatch it
    pub fn handle_events(
        &mut self,
        state: &Arc<RwLock<AppState>>,
        client: &AuditClient,
    ) -> Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, state, client);
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>, client: &AuditClient) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('s') if ctrl => {
                submit_if_ready(state, client);
            }
            KeyCode::F(5) => {
                submit_if_ready(state, client);
            }
            KeyCode::F(2) => spawn_health_probe(Arc::clone(state), client.clone()),
            KeyCode::Tab | KeyCode::BackTab => apply(state, AppAction::CycleFocus),
            _ => {
                let Some(focus) = state.read().ok().map(|s| s.ui.focus) else {
                    return;
                };
                let leftover = match focus {
                    Focus::Endpoint => handle_endpoint_key(key, state),
                    Focus::Editor => handle_editor_key(key, state),
                    Focus::Result => {
                        self.handle_result_key(key, state);
                        None
                    }
                };

                // Key that ended a paste batch
                if let Some(next) = leftover.filter(|k| k.kind == KeyEventKind::Press) {
                    self.handle_key(next, state, client);
                }
            }
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent, state: &Arc<RwLock<AppState>>) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('y') => yank::handle_yank_result(state),
            KeyCode::Char('d') if ctrl => apply(state, AppAction::ScrollResultDown),
            KeyCode::Char('u') if ctrl => apply(state, AppAction::ScrollResultUp),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::PageDown => {
                apply(state, AppAction::ScrollResultDown)
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::PageUp => {
                apply(state, AppAction::ScrollResultUp)
            }
            _ => {}
        }
    }
}

/// Returns the key that ended a paste batch, still to be handled
fn handle_endpoint_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<KeyEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter | KeyCode::Esc => apply(state, AppAction::SetFocus(Focus::Editor)),
        KeyCode::Backspace => apply(state, AppAction::BackspaceEndpoint),
        KeyCode::Char('w') if ctrl => apply(state, AppAction::DeleteWordEndpoint),
        KeyCode::Char('l') if ctrl => apply(state, AppAction::ClearEndpoint),
        KeyCode::Char(c) if !ctrl => {
            let (batch, rest) = collect_paste_batch(c);
            apply(state, AppAction::AppendToEndpoint(batch));
            return rest;
        }
        _ => {}
    }
    None
}

/// Returns the key that ended a paste batch, still to be handled
fn handle_editor_key(key: KeyEvent, state: &Arc<RwLock<AppState>>) -> Option<KeyEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => apply(state, AppAction::SetFocus(Focus::Result)),
        KeyCode::Char('f') if ctrl => apply(state, AppAction::FormatPayload),
        KeyCode::Char('r') if ctrl => apply(state, AppAction::ResetPayload),
        KeyCode::Char(c) if !ctrl => {
            let (batch, rest) = collect_paste_batch(c);
            apply(state, AppAction::InsertPayloadText(batch));
            return rest;
        }
        _ => edit_payload(key, state),
    }
    None
}

fn edit_payload(key: KeyEvent, state: &Arc<RwLock<AppState>>) {
    if let Ok(mut s) = state.write() {
        s.editor.handle_key_event(key);
    }
}
