pub mod delete_confirmation;
pub mod progress_panel;
