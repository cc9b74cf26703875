use async_trait::async_trait;

use crate::model::view_state::UploadViewState;

/// Surface the upload controller presents itself through.
///
/// The controller owns the [`UploadViewState`] and hands it over after every
/// change; a view never mutates it.
#[async_trait]
pub trait UploadView: Send {
    /// Shows the current state of the upload panel
    fn render(&mut self, state: &UploadViewState);

    /// Blocking, user-visible error message
    fn alert(&mut self, message: &str);

    /// Yes/no question guarding a destructive action
    async fn confirm(&mut self, prompt: &str) -> bool;

    /// Throw away what is displayed and resync with the server
    fn reload(&mut self);
}
