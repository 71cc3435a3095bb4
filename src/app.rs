use crate::config::Config;
use crate::request::AuditClient;
use crate::state::AppState;
use crate::ui;
use crate::ui::draw;
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Debug)]
pub struct App {
    state: Arc<RwLock<AppState>>,
    client: AuditClient,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let state = AppState::new(config.endpoint.url);

        Self {
            state: Arc::new(RwLock::new(state)),
            client: AuditClient::new(),
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.event_handler.should_quit {
            // Update spinner animation
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            self.event_handler.handle_events(&self.state, &self.client)?;
        }

        tracing::info!("quitting");
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        // Header, endpoint, body, status, footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[2]);

        draw::render_header(frame, main_chunks[0], &state);
        draw::render_endpoint_bar(frame, main_chunks[1], &state);
        draw::render_editor_panel(frame, body_chunks[0], &state);
        draw::render_result_panel(frame, body_chunks[1], &state);
        draw::render_status_line(frame, main_chunks[3], &state, self.spinner_index);
        draw::render_footer(frame, main_chunks[4], state.ui.focus);
    }
}
