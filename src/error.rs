use thiserror::Error;

/// Shown when a failure carries no message of its own
pub const FALLBACK_MESSAGE: &str = "Gagal memproses audit";

/// Ways a single audit attempt can fail
///
/// Every variant is terminal for the attempt and none is fatal to the app.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Editor text is not valid JSON
    #[error("{0}")]
    PayloadParse(#[source] serde_json::Error),

    /// No HTTP response (DNS, connection refused, malformed URL, ...)
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    /// HTTP response with a non-success status
    #[error("API error {status}")]
    Service { status: u16 },

    /// Success status but the body is not JSON
    #[error("{0}")]
    ResponseParse(#[source] serde_json::Error),
}

impl AuditError {
    /// Message surfaced in the UI
    pub fn user_message(&self) -> String {
        message_or_fallback(self.to_string())
    }
}

/// Blank messages (a source error with an empty Display) read as the fallback
fn message_or_fallback(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}
