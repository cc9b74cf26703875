//! Terminal front-end of the upload controller
//!
//! The panel lives in an inline viewport under the shell prompt. Alerts and
//! reports are printed above it so they stay in the scrollback.
use async_trait::async_trait;
use color_eyre::eyre;
use crossterm::event::{Event, EventStream};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Clear, Paragraph, Widget},
    Terminal, TerminalOptions, Viewport,
};
use tokio_stream::StreamExt;

use crate::components::component::ComponentRender;
use crate::components::widgets::delete_confirmation::DeleteConfirmation;
use crate::components::widgets::progress_panel::ProgressPanel;
use crate::model::view_state::UploadViewState;
use crate::services::upload_view::UploadView;
use crate::utils::{io, IO};

pub struct TerminalView {
    terminal: Terminal<CrosstermBackend<IO>>,
    assume_yes: bool,
    reload_requested: bool,
}

impl TerminalView {
    /// `assume_yes` answers every confirmation without asking
    pub fn new(assume_yes: bool) -> eyre::Result<Self> {
        let terminal = Terminal::with_options(
            CrosstermBackend::new(io()),
            TerminalOptions {
                viewport: Viewport::Inline(ProgressPanel::HEIGHT),
            },
        )?;
        Ok(TerminalView {
            terminal,
            assume_yes,
            reload_requested: false,
        })
    }

    /// Whether the controller asked for a resync since the view was created
    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    /// Prints a line above the panel
    pub fn print_line(&mut self, line: Line<'static>) -> eyre::Result<()> {
        self.terminal
            .insert_before(1, |buf| Paragraph::new(line).render(buf.area, buf))?;
        Ok(())
    }

    /// Leaves the cursor below everything printed so far
    pub fn finish(mut self) -> eyre::Result<()> {
        self.terminal.clear()?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    async fn read_answer() -> eyre::Result<bool> {
        enable_raw_mode()?;
        let mut events = EventStream::new();
        let answer = loop {
            match events.next().await {
                Some(Ok(Event::Key(key))) => {
                    if let Some(answer) = DeleteConfirmation::handle_key_event(key) {
                        break Ok(answer);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e),
                None => break Ok(false),
            }
        };
        disable_raw_mode()?;
        Ok(answer?)
    }
}

#[async_trait]
impl UploadView for TerminalView {
    fn render(&mut self, state: &UploadViewState) {
        if let Err(e) = self
            .terminal
            .draw(|frame| ProgressPanel.render(frame, state))
        {
            tracing::error!("could not render the progress panel: {}", e);
        }
    }

    fn alert(&mut self, message: &str) {
        let line = Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).bold(),
        ));
        if let Err(e) = self.print_line(line) {
            tracing::error!("could not print alert: {}", e);
        }
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if let Err(e) = self
            .terminal
            .draw(|frame| DeleteConfirmation::render(frame, prompt))
        {
            tracing::error!("could not render the confirmation: {}", e);
            return false;
        }

        let answer = Self::read_answer().await.unwrap_or_else(|e| {
            tracing::error!("could not read the answer: {}", e);
            false
        });
        if let Err(e) = self.terminal.draw(|frame| frame.render_widget(Clear, frame.area())) {
            tracing::error!("could not clear the confirmation: {}", e);
        }
        answer
    }

    fn reload(&mut self) {
        tracing::debug!("reload requested");
        self.reload_requested = true;
    }
}
