//! Plain-text front-end for runs without an interactive terminal
//!
//! Nothing is drawn. Alerts and reports go out as whole lines, so the
//! output stays readable when piped or captured by a script.
use std::io::Write;

use async_trait::async_trait;
use color_eyre::eyre;
use ratatui::text::Line;

use crate::model::view_state::UploadViewState;
use crate::services::upload_view::UploadView;

pub struct LineView<W> {
    out: W,
    assume_yes: bool,
    reload_requested: bool,
}

impl<W: Write + Send> LineView<W> {
    /// `assume_yes` answers every confirmation; without it there is nobody to ask
    pub fn new(out: W, assume_yes: bool) -> Self {
        LineView {
            out,
            assume_yes,
            reload_requested: false,
        }
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    /// Writes the text of `line`, styling dropped
    pub fn print_line(&mut self, line: Line<'_>) -> eyre::Result<()> {
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> UploadView for LineView<W> {
    fn render(&mut self, state: &UploadViewState) {
        tracing::trace!(percent = state.percent, label = %state.label, "progress");
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.out, "{}", message) {
            tracing::error!("could not print alert: {}", e);
        }
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        if !self.assume_yes {
            tracing::warn!(prompt, "no terminal to confirm on, declining");
            self.alert(&format!("{} Not confirmed, pass --yes to skip the question", prompt));
        }
        self.assume_yes
    }

    fn reload(&mut self) {
        tracing::debug!("reload requested");
        self.reload_requested = true;
    }
}
