use crate::editor::PayloadEditor;
use crate::types::{AuditPayload, AuditResult, Focus, HealthStatus};

/// Fields written only by the audit runner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditState {
    /// A request is in flight; submission is disabled while set
    pub loading: bool,
    /// Message of the last failed attempt
    pub error: Option<String>,
    /// Report of the last successful attempt
    pub result: Option<AuditResult>,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    /// Scroll offset for the result panel (lines)
    pub result_scroll: usize,
    /// Brief highlight after copying the result
    pub yank_flash: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Editor,
            result_scroll: 0,
            yank_flash: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub editor: PayloadEditor,
    /// Destination URL, edited in place; never validated
    pub endpoint_input: String,
    pub audit: AuditState,
    pub health: HealthStatus,
    pub ui: UiState,
}

impl AppState {
    pub fn new(endpoint: String) -> Self {
        Self {
            editor: PayloadEditor::with_content(AuditPayload::sample_json()),
            endpoint_input: endpoint,
            audit: AuditState::default(),
            health: HealthStatus::Unknown,
            ui: UiState::default(),
        }
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.audit.loading && self.editor.is_valid_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;

    #[test]
    fn test_new_state_seeds_sample_payload() {
        let state = AppState::new(DEFAULT_ENDPOINT.to_string());
        assert_eq!(state.endpoint_input, "http://localhost:8000/audit");
        assert_eq!(state.editor.record_count(), Some(3));
        assert_eq!(state.audit, AuditState::default());
        assert_eq!(state.health, HealthStatus::Unknown);
        assert_eq!(state.ui.focus, Focus::Editor);
    }

    #[test]
    fn test_can_submit_requires_valid_json() {
        let mut state = AppState::new(DEFAULT_ENDPOINT.to_string());
        assert!(state.can_submit());

        for text in ["", "{", "{\"records\": [}", "not json", "{'single': 1}"] {
            state.editor.set_content(text.to_string());
            assert!(!state.can_submit(), "should reject {text:?}");
        }

        for text in ["{}", "[]", "42", "\"text\"", "null", "  {\n \"records\" : [ ] }  "] {
            state.editor.set_content(text.to_string());
            assert!(state.can_submit(), "should accept {text:?}");
        }
    }

    #[test]
    fn test_can_submit_accepts_json_a_decoder_would_refuse() {
        let mut state = AppState::new(DEFAULT_ENDPOINT.to_string());

        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        for text in ["{\"a\": 1e400}", "\"\\ud800\"", deep.as_str()] {
            state.editor.set_content(text.to_string());
            assert!(state.can_submit(), "should accept {text:?}");
        }
    }

    #[test]
    fn test_can_submit_blocked_while_loading() {
        let mut state = AppState::new(DEFAULT_ENDPOINT.to_string());
        state.audit.loading = true;
        assert!(!state.can_submit());
    }
}
