use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
};

use crate::components::component::ComponentRender;
use crate::model::view_state::UploadViewState;

/// Gauge with the current file, percentage and time left
pub struct ProgressPanel;

impl ProgressPanel {
    /// Rows the panel occupies: bordered gauge plus the ETA line
    pub const HEIGHT: u16 = 4;

    fn make_gauge(state: &UploadViewState) -> Gauge<'_> {
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", state.label))
                    .fg(Color::White),
            )
            .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
            .percent(u16::from(state.percent.min(100)))
            .label(state.percent_text())
    }
}

impl<'a> ComponentRender<&'a UploadViewState> for ProgressPanel {
    fn render(&self, frame: &mut Frame, state: &'a UploadViewState) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        if !state.progress_visible {
            return;
        }

        let [gauge_area, time_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);
        frame.render_widget(Self::make_gauge(state), gauge_area);
        frame.render_widget(
            Paragraph::new(state.time_left.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right),
            time_area,
        );
    }
}
