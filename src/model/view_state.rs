//! View-model for the upload panel
//!
//! Everything the user sees of an upload lives here. The controller is the
//! only writer; views only render it.

use crate::model::selected_file::SelectedFileSet;

pub const COMPLETE_LABEL: &str = "Complete!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadViewState {
    /// Whether the progress panel is shown
    pub progress_visible: bool,
    /// Whether a new selection may be made
    pub input_enabled: bool,
    /// Files currently held by the picker
    pub selection: SelectedFileSet,
    pub percent: u8,
    pub label: String,
    pub time_left: String,
}

impl Default for UploadViewState {
    fn default() -> Self {
        UploadViewState {
            progress_visible: false,
            input_enabled: true,
            selection: SelectedFileSet::default(),
            percent: 0,
            label: String::new(),
            time_left: String::new(),
        }
    }
}

impl UploadViewState {
    /// Text of the percentage label, e.g. `42%`
    pub fn percent_text(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Back to the idle look; calling it twice changes nothing
    pub fn reset(&mut self) {
        *self = UploadViewState::default();
    }

    pub fn clear_selection(&mut self) {
        self.selection = SelectedFileSet::default();
    }

    pub fn mark_complete(&mut self) {
        self.percent = 100;
        self.label = COMPLETE_LABEL.to_string();
    }

    pub fn is_idle(&self) -> bool {
        *self == UploadViewState::default()
    }
}

/// Label for the file being sent: bare name for single uploads,
/// `index/count: name` otherwise. `index` is one-based.
pub fn file_label(name: &str, index: usize, count: usize) -> String {
    if count == 1 {
        name.to_string()
    } else {
        format!("{}/{}: {}", index, count, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::selected_file::SelectedFile;

    #[test]
    fn test_default_is_idle() {
        let state = UploadViewState::default();
        assert!(state.is_idle());
        assert!(state.input_enabled);
        assert!(!state.progress_visible);
        assert_eq!(state.percent_text(), "0%");
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = UploadViewState {
            progress_visible: true,
            input_enabled: false,
            selection: SelectedFileSet::new(vec![SelectedFile::new("a", 1, "/a")]),
            percent: 40,
            label: "a".into(),
            time_left: "3s left".into(),
        };
        state.reset();
        assert!(state.is_idle());
        state.reset();
        assert!(state.is_idle());
    }

    #[test]
    fn test_mark_complete() {
        let mut state = UploadViewState::default();
        state.mark_complete();
        assert_eq!(state.percent_text(), "100%");
        assert_eq!(state.label, "Complete!");
    }

    #[test]
    fn test_file_label_single() {
        assert_eq!(file_label("photo.jpg", 1, 1), "photo.jpg");
    }

    #[test]
    fn test_file_label_multiple() {
        assert_eq!(file_label("photo.jpg", 2, 5), "2/5: photo.jpg");
    }
}
