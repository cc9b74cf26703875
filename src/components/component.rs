use ratatui::Frame;

/// A piece of the terminal UI drawn from borrowed state.
///
/// Widgets keep no state of their own; everything they show comes in
/// through `props` on each frame.
pub trait ComponentRender<Props> {
    fn render(&self, frame: &mut Frame, props: Props);
}
