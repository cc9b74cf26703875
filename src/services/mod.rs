//! This module provides the upload workflow and the connection to the FlashVault server

pub mod progress_stream;
pub mod upload_controller;
pub mod upload_view;
pub mod vault_client;
