//! This module provides common objects used throughout the entire application

pub mod error;
pub mod progress_tick;
pub mod selected_file;
pub mod server_reply;
pub mod upload_phase;
pub mod upload_session;
pub mod view_state;
