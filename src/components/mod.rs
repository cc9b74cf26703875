//! Terminal widgets and the views that drive them

pub mod component;
pub mod console_view;
pub mod line_view;
pub mod terminal_view;
pub mod widgets;
