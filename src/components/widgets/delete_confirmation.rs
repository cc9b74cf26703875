use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Yes/no dialog shown before a remote file is deleted
pub struct DeleteConfirmation;

impl DeleteConfirmation {
    /// Handle key events while the dialog is showing.
    /// Returns Some(true) if the user confirmed, Some(false) if cancelled, None if key not handled.
    pub fn handle_key_event(key: KeyEvent) -> Option<bool> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') => Some(false),
            _ => None,
        }
    }

    pub fn render(frame: &mut Frame, prompt: &str) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(Self::make_dialog(prompt), area);
    }

    fn make_dialog(prompt: &str) -> Paragraph<'_> {
        Paragraph::new(prompt)
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow))
                    .title(" Confirm Delete ")
                    .title_bottom(
                        Line::from(vec![
                            Span::raw(" Press "),
                            Span::styled("Enter/y", Style::default().fg(Color::Red).bold()),
                            Span::raw(" to delete, "),
                            Span::styled("Esc/n", Style::default().fg(Color::Green).bold()),
                            Span::raw(" to keep "),
                        ])
                        .alignment(Alignment::Center),
                    ),
            )
            .alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_confirm_keys() {
        assert_eq!(DeleteConfirmation::handle_key_event(press(KeyCode::Enter)), Some(true));
        assert_eq!(DeleteConfirmation::handle_key_event(press(KeyCode::Char('y'))), Some(true));
    }

    #[test]
    fn test_cancel_keys() {
        assert_eq!(DeleteConfirmation::handle_key_event(press(KeyCode::Esc)), Some(false));
        assert_eq!(DeleteConfirmation::handle_key_event(press(KeyCode::Char('n'))), Some(false));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(DeleteConfirmation::handle_key_event(press(KeyCode::Char('x'))), None);
        let release = KeyEvent {
            code: KeyCode::Char('y'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(DeleteConfirmation::handle_key_event(release), None);
    }

    #[test]
    fn test_dialog_shows_prompt() {
        let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();
        terminal
            .draw(|frame| DeleteConfirmation::render(frame, "Delete \"a.txt\"?"))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Delete \"a.txt\"?"));
        assert!(screen.contains("Confirm Delete"));
    }
}
