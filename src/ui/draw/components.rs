//! Reusable UI components
//!
//! - Header (title, subtitle, service health)
//! - Endpoint bar
//! - Status line (submit control, validity notice, error)
//! - Footer (command help)

use super::styling;
use crate::config::endpoint_origin;
use crate::state::AppState;
use crate::types::{Focus, HealthStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const APP_TITLE: &str = "RT-DocWatch";
pub const APP_SUBTITLE: &str = "Audit Konsistensi Dokumen Radioterapi Berbasis LLM";
pub const INVALID_JSON_NOTICE: &str = "JSON tidak valid.";

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Render the application header with the service status
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = Line::from(vec![
        Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::raw(APP_SUBTITLE),
        Span::raw("  |  "),
        Span::styled(
            health_label(&state.health, &state.endpoint_input),
            health_style(&state.health),
        ),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Render the endpoint URL input
pub fn render_endpoint_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Endpoint;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::border_for(focused))
        .title(" [1] URL API Python ");

    let text = if focused {
        format!("{}_", state.endpoint_input) // Show cursor
    } else {
        state.endpoint_input.clone()
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Render the submit control, the validity notice and the last error
pub fn render_status_line(frame: &mut Frame, area: Rect, state: &AppState, spinner_index: usize) {
    let mut spans = vec![Span::styled(
        format!(" {} ", submit_label(state.audit.loading)),
        styling::submit_button(state.can_submit()),
    )];

    if state.audit.loading {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            SPINNER[spinner_index % SPINNER.len()],
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(notice) = validity_notice(state) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(notice, styling::error_text()));
    }

    if let Some(error) = &state.audit.error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(error.clone(), styling::error_text()));
    }

    let status = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

/// Render the footer with command help
pub fn render_footer(frame: &mut Frame, area: Rect, focus: Focus) {
    let footer_text = match focus {
        Focus::Endpoint => "Tab:Focus Enter:Editor Ctrl+W:Del word Ctrl+L:Clear | Ctrl+S/F5:Audit F2:Health Ctrl+C:Quit",
        Focus::Editor => "Tab:Focus Ctrl+F:Format Ctrl+R:Sample Esc:Result | Ctrl+S/F5:Audit F2:Health Ctrl+C:Quit",
        Focus::Result => "Tab:Focus j/k/Ctrl+D/Ctrl+U:Scroll y:Yank | Ctrl+S/F5:Audit F2:Health q:Quit",
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

pub fn submit_label(loading: bool) -> &'static str {
    if loading {
        "Memproses..."
    } else {
        "Jalankan Audit"
    }
}

/// Literal notice shown while the payload text is not valid JSON
pub fn validity_notice(state: &AppState) -> Option<&'static str> {
    if state.editor.is_valid_json() {
        None
    } else {
        Some(INVALID_JSON_NOTICE)
    }
}

pub fn health_label(health: &HealthStatus, endpoint: &str) -> String {
    let origin = endpoint_origin(endpoint).unwrap_or_else(|| endpoint.trim().to_string());

    match health {
        HealthStatus::Unknown => format!("{origin} [F2: check service]"),
        HealthStatus::Checking => format!("{origin} [checking...]"),
        HealthStatus::Ok => format!("{origin} [service: ok]"),
        HealthStatus::Status(code) => format!("{origin} [service: {code}]"),
        HealthStatus::Unreachable => format!("{origin} [service: unreachable]"),
    }
}

fn health_style(health: &HealthStatus) -> Style {
    match health {
        HealthStatus::Ok => Style::default().fg(Color::Green),
        HealthStatus::Status(_) | HealthStatus::Unreachable => styling::error_text(),
        HealthStatus::Unknown | HealthStatus::Checking => Style::default().fg(Color::Gray),
    }
}
