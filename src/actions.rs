use crate::editor::PayloadEditor;
use crate::state::AppState;
use crate::types::{AuditPayload, AuditResult, Focus, HealthStatus};

/// Represents all possible state-changing actions in the application
/// Input handling and the background tasks produce actions; only
/// `apply_action` mutates AppState.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Focus
    CycleFocus,
    SetFocus(Focus),

    // Endpoint input
    AppendToEndpoint(String),
    BackspaceEndpoint,
    DeleteWordEndpoint,
    ClearEndpoint,

    // Payload editor
    InsertPayloadText(String),
    FormatPayload,
    ResetPayload,

    // Audit lifecycle (runner only)
    BeginAudit,
    FinishAudit(Result<AuditResult, String>),
    AbandonAudit,

    // Health probe
    SetHealth(HealthStatus),

    // Result panel
    ScrollResultUp,
    ScrollResultDown,
    SetYankFlash(bool),
}

/// Lines moved per scroll action (Ctrl+U / Ctrl+D)
pub const SCROLL_LINES_PER_ACTION: usize = 5;

/// Apply an action to the application state
pub fn apply_action(action: AppAction, state: &mut AppState) {
    match action {
        AppAction::CycleFocus => {
            state.ui.focus = state.ui.focus.next();
        }
        AppAction::SetFocus(focus) => {
            state.ui.focus = focus;
        }

        AppAction::AppendToEndpoint(text) => {
            state.endpoint_input.push_str(&text);
        }
        AppAction::BackspaceEndpoint => {
            state.endpoint_input.pop();
        }
        AppAction::DeleteWordEndpoint => {
            delete_word(&mut state.endpoint_input);
        }
        AppAction::ClearEndpoint => {
            state.endpoint_input.clear();
        }

        AppAction::InsertPayloadText(text) => {
            state.editor.insert_str_normalized(&text);
        }
        AppAction::FormatPayload => {
            if let Err(e) = state.editor.format_json() {
                tracing::debug!(error = %e, "payload not formatted");
            }
        }
        AppAction::ResetPayload => {
            state.editor = PayloadEditor::with_content(AuditPayload::sample_json());
        }

        AppAction::BeginAudit => {
            state.audit.error = None;
            state.audit.loading = true;
        }
        AppAction::FinishAudit(outcome) => {
            match outcome {
                Ok(result) => {
                    state.audit.result = Some(result);
                    state.ui.result_scroll = 0;
                }
                Err(message) => {
                    state.audit.error = Some(message);
                    state.audit.result = None;
                }
            }
            state.audit.loading = false;
        }
        AppAction::AbandonAudit => {
            state.audit.loading = false;
        }

        AppAction::SetHealth(status) => {
            state.health = status;
        }

        AppAction::ScrollResultUp => {
            state.ui.result_scroll = state
                .ui
                .result_scroll
                .saturating_sub(SCROLL_LINES_PER_ACTION);
        }
        AppAction::ScrollResultDown => {
            state.ui.result_scroll = state
                .ui
                .result_scroll
                .saturating_add(SCROLL_LINES_PER_ACTION);
        }
        AppAction::SetYankFlash(on) => {
            state.ui.yank_flash = on;
        }
    }
}

/// Delete the last word from a string (Ctrl+W behavior)
/// URL separators count as word boundaries so a path segment goes at a time
fn delete_word(s: &mut String) {
    let trimmed_len = s.trim_end_matches(['/', ' ']).len();
    s.truncate(trimmed_len);

    match s.rfind(|c: char| c == '/' || c.is_whitespace()) {
        Some(pos) => s.truncate(pos + 1),
        None => s.clear(),
    }
}
