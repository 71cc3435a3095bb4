//! Main panel rendering
//!
//! - Payload editor (left side)
//! - Audit result (right side)

use super::result::{inconsistency_dump, outcome_rows, INCONSISTENCY_TITLE, RESULT_TITLE};
use super::styling;
use crate::editor::PayloadEditor;
use crate::state::AppState;
use crate::types::Focus;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the payload editor with its cursor
pub fn render_editor_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Editor;
    let editor = &state.editor;

    let modified = if editor.is_dirty() { " *" } else { "" };
    let title = match editor.record_count() {
        Some(count) => format!(" [2] Payload (JSON){modified} - {count} records "),
        None => format!(" [2] Payload (JSON){modified} "),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::border_for(focused))
        .title(title);

    let (cursor_line, _) = editor.cursor_line_col();
    let visible = area.height.saturating_sub(2) as usize;
    let offset = cursor_line.saturating_sub(visible.saturating_sub(1));

    let paragraph = Paragraph::new(editor_lines(editor, focused))
        .block(block)
        .scroll((offset as u16, 0));

    frame.render_widget(paragraph, area);
}

/// Split editor content into lines, marking the cursor cell when focused
fn editor_lines(editor: &PayloadEditor, focused: bool) -> Vec<Line<'static>> {
    let (cursor_line, cursor_col) = editor.cursor_line_col();

    editor
        .content()
        .split('\n')
        .enumerate()
        .map(|(idx, text)| {
            if !focused || idx != cursor_line {
                return Line::from(text.to_string());
            }

            let before: String = text.chars().take(cursor_col).collect();
            let at: String = text
                .chars()
                .nth(cursor_col)
                .map(String::from)
                .unwrap_or_else(|| " ".to_string());
            let after: String = text.chars().skip(cursor_col + 1).collect();

            Line::from(vec![
                Span::raw(before),
                Span::styled(at, styling::cursor_cell()),
                Span::raw(after),
            ])
        })
        .collect()
}

/// Render the audit report, or an empty panel when there is none
pub fn render_result_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == Focus::Result;

    let border_style = if state.ui.yank_flash {
        Style::default().fg(Color::Green)
    } else {
        styling::border_for(focused)
    };

    let title = if state.audit.loading && state.audit.result.is_some() {
        format!(" [3] {RESULT_TITLE} (memproses...) ")
    } else {
        format!(" [3] {RESULT_TITLE} ")
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let Some(result) = &state.audit.result else {
        frame.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = outcome_rows(result).into_iter().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        INCONSISTENCY_TITLE,
        styling::label_text().add_modifier(Modifier::BOLD),
    )));
    for line in inconsistency_dump(result).lines() {
        lines.push(Line::from(line.to_string()));
    }

    let max_scroll = lines.len().saturating_sub(1);
    let scroll = state.ui.result_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_editor_lines_marks_cursor() {
        let mut editor = PayloadEditor::with_content("{\n  \"a\": 1\n}".to_string());
        editor.move_cursor_down();
        editor.move_cursor_right();
        editor.move_cursor_right();

        let lines = editor_lines(&editor, true);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].spans.len(), 3);
        assert_eq!(lines[1].spans[1].content, "\"");
        assert_eq!(line_text(&lines[1]), "  \"a\": 1");
    }

    #[test]
    fn test_editor_lines_cursor_at_line_end() {
        let mut editor = PayloadEditor::with_content("{}".to_string());
        editor.move_cursor_to_end();

        let lines = editor_lines(&editor, true);
        assert_eq!(lines[0].spans[1].content, " ");
    }

    #[test]
    fn test_editor_lines_unfocused_is_plain() {
        let editor = PayloadEditor::with_content("{\n}".to_string());
        let lines = editor_lines(&editor, false);
        assert!(lines.iter().all(|line| line.spans.len() == 1));
    }
}
