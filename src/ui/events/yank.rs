//! Yank (copy) handlers
//!
//! Copies the audit report, as displayed, to the system clipboard.

use super::helpers::apply;
use crate::actions::AppAction;
use crate::state::AppState;
use crate::ui::draw::report_text;
use arboard::Clipboard;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Yank the current report to the clipboard and flash the result panel
pub fn handle_yank_result(state: &Arc<RwLock<AppState>>) {
    let text = {
        let Ok(s) = state.read() else {
            return;
        };
        match &s.audit.result {
            Some(result) => report_text(result),
            None => {
                debug!("no result available to yank");
                return;
            }
        }
    };

    let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));

    match copied {
        Ok(()) => {
            info!("report copied to clipboard");
            apply(state, AppAction::SetYankFlash(true));

            // Clear the flash after a short delay
            let state = Arc::clone(state);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(200)).await;
                apply(&state, AppAction::SetYankFlash(false));
            });
        }
        Err(e) => {
            warn!(error = %e, "failed to copy report to clipboard");
        }
    }
}
