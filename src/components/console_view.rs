//! Picks the front-end a command runs with
//!
//! The inline panel needs a terminal to read the cursor position from.
//! Piped output, or a delete that was already confirmed with `--yes`,
//! gets plain lines instead.
use std::io::IsTerminal;

use async_trait::async_trait;
use color_eyre::eyre;
use ratatui::text::Line;

use crate::components::line_view::LineView;
use crate::components::terminal_view::TerminalView;
use crate::model::view_state::UploadViewState;
use crate::services::upload_view::UploadView;
use crate::utils::{io, IO};

pub enum ConsoleView {
    Inline(TerminalView),
    Plain(LineView<IO>),
}

impl ConsoleView {
    /// Inline panel when stdout is a terminal and questions may be asked
    pub fn open(assume_yes: bool) -> eyre::Result<Self> {
        Self::select(assume_yes, io().is_terminal())
    }

    pub fn select(assume_yes: bool, interactive: bool) -> eyre::Result<Self> {
        if assume_yes || !interactive {
            tracing::debug!(assume_yes, interactive, "plain output");
            return Ok(ConsoleView::Plain(LineView::new(io(), assume_yes)));
        }
        Ok(ConsoleView::Inline(TerminalView::new(assume_yes)?))
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, ConsoleView::Plain(_))
    }

    pub fn reload_requested(&self) -> bool {
        match self {
            ConsoleView::Inline(view) => view.reload_requested(),
            ConsoleView::Plain(view) => view.reload_requested(),
        }
    }

    pub fn print_line(&mut self, line: Line<'static>) -> eyre::Result<()> {
        match self {
            ConsoleView::Inline(view) => view.print_line(line),
            ConsoleView::Plain(view) => view.print_line(line),
        }
    }

    pub fn finish(self) -> eyre::Result<()> {
        match self {
            ConsoleView::Inline(view) => view.finish(),
            ConsoleView::Plain(_) => Ok(()),
        }
    }
}

#[async_trait]
impl UploadView for ConsoleView {
    fn render(&mut self, state: &UploadViewState) {
        match self {
            ConsoleView::Inline(view) => view.render(state),
            ConsoleView::Plain(view) => view.render(state),
        }
    }

    fn alert(&mut self, message: &str) {
        match self {
            ConsoleView::Inline(view) => view.alert(message),
            ConsoleView::Plain(view) => view.alert(message),
        }
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        match self {
            ConsoleView::Inline(view) => view.confirm(prompt).await,
            ConsoleView::Plain(view) => view.confirm(prompt).await,
        }
    }

    fn reload(&mut self) {
        match self {
            ConsoleView::Inline(view) => view.reload(),
            ConsoleView::Plain(view) => view.reload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_terminal_is_plain() {
        let view = ConsoleView::select(false, false).unwrap();
        assert!(view.is_plain());
        assert!(!view.reload_requested());
        view.finish().unwrap();
    }

    #[tokio::test]
    async fn test_assume_yes_is_plain_and_confirms() {
        let mut view = ConsoleView::select(true, true).unwrap();
        assert!(view.is_plain());
        assert!(view.confirm("Delete \"a.txt\"?").await);
        view.reload();
        assert!(view.reload_requested());
    }
}
